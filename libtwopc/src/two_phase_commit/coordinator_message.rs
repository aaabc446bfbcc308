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

//! Contains CoordinatorMessage, a message which is delivered to the coordinator.

use std::fmt::{Display, Formatter, Result as FormatResult};

use crate::message::Message;

use super::WorkerId;

/// A worker's answer to [`CanCommit`](super::CanCommit).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VoteValue {
    Yes,
    No,
}

impl From<bool> for VoteValue {
    fn from(can_commit: bool) -> Self {
        if can_commit {
            VoteValue::Yes
        } else {
            VoteValue::No
        }
    }
}

impl Display for VoteValue {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        match self {
            VoteValue::Yes => f.write_str("yes"),
            VoteValue::No => f.write_str("no"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Vote {
    worker_id: WorkerId,
    value: VoteValue,
}

impl Vote {
    pub fn new(worker_id: WorkerId, value: VoteValue) -> Self {
        Vote { worker_id, value }
    }

    pub fn yes(worker_id: WorkerId) -> Self {
        Vote::new(worker_id, VoteValue::Yes)
    }

    pub fn no(worker_id: WorkerId) -> Self {
        Vote::new(worker_id, VoteValue::No)
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    pub fn value(&self) -> VoteValue {
        self.value
    }
}

impl Display for Vote {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "vote({}: {})", self.worker_id, self.value)
    }
}

impl Message for Vote {}

/// A worker's acknowledgment of a received [`Decision`](super::Decision).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ack {
    worker_id: WorkerId,
}

impl Ack {
    pub fn new(worker_id: WorkerId) -> Self {
        Ack { worker_id }
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }
}

impl Display for Ack {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "ack({})", self.worker_id)
    }
}

impl Message for Ack {}

/// A message which is delivered to the coordinator.
///
/// This is the set of inbound messages the coordinator's decision loop waits on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordinatorMessage {
    Vote(Vote),
    Ack(Ack),
}

impl CoordinatorMessage {
    pub fn worker_id(&self) -> WorkerId {
        match self {
            CoordinatorMessage::Vote(vote) => vote.worker_id(),
            CoordinatorMessage::Ack(ack) => ack.worker_id(),
        }
    }
}

impl From<Vote> for CoordinatorMessage {
    fn from(vote: Vote) -> Self {
        CoordinatorMessage::Vote(vote)
    }
}

impl From<Ack> for CoordinatorMessage {
    fn from(ack: Ack) -> Self {
        CoordinatorMessage::Ack(ack)
    }
}

impl Display for CoordinatorMessage {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        match self {
            CoordinatorMessage::Vote(vote) => write!(f, "{}", vote),
            CoordinatorMessage::Ack(ack) => write!(f, "{}", ack),
        }
    }
}

impl Message for CoordinatorMessage {}
