// Copyright 2021 Cargill Incorporated
// Copyright 2023 Bitwise IO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::InvalidStateError;

use super::CanCommit;
use super::Coordinator;
use super::Decision;

/// Capacity of the inbound vote and ack channels, large enough that a burst of replies from the
/// workers does not block them.
pub(super) const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// How long `start` waits after launching the decision loop. This gives the loop a chance to
/// begin servicing its channels; it is not a correctness guarantee.
pub(super) const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(100);

#[derive(Default)]
pub struct CoordinatorBuilder {
    can_commit_sender: Option<mpsc::Sender<CanCommit>>,
    decision_sender: Option<mpsc::Sender<Decision>>,
    channel_capacity: Option<usize>,
    startup_delay: Option<Duration>,
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            can_commit_sender: None,
            decision_sender: None,
            channel_capacity: None,
            startup_delay: None,
        }
    }

    pub fn with_can_commit_sender(mut self, can_commit_sender: mpsc::Sender<CanCommit>) -> Self {
        self.can_commit_sender = Some(can_commit_sender);
        self
    }

    pub fn with_decision_sender(mut self, decision_sender: mpsc::Sender<Decision>) -> Self {
        self.decision_sender = Some(decision_sender);
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = Some(channel_capacity);
        self
    }

    pub fn with_startup_delay(mut self, startup_delay: Duration) -> Self {
        self.startup_delay = Some(startup_delay);
        self
    }

    pub fn build(self) -> Result<Coordinator, InvalidStateError> {
        let can_commit_sender = self.can_commit_sender.ok_or_else(|| {
            InvalidStateError::with_message("missing can_commit_sender field".into())
        })?;

        let decision_sender = self.decision_sender.ok_or_else(|| {
            InvalidStateError::with_message("missing decision_sender field".into())
        })?;

        let channel_capacity = self.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY);
        if channel_capacity == 0 {
            return Err(InvalidStateError::with_message(
                "channel_capacity must be greater than zero".into(),
            ));
        }

        let startup_delay = self.startup_delay.unwrap_or(DEFAULT_STARTUP_DELAY);

        Ok(Coordinator::from_parts(
            can_commit_sender,
            decision_sender,
            channel_capacity,
            startup_delay,
        ))
    }
}
