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

//! Messages which are delivered to a participant (worker) by the coordinator.

use std::fmt::{Display, Formatter, Result as FormatResult};

use crate::message::Message;

use super::WorkerId;

/// The global result of a round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Outcome {
    Commit,
    Abort,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        match self {
            Outcome::Commit => f.write_str("commit"),
            Outcome::Abort => f.write_str("abort"),
        }
    }
}

/// The phase one poll asking a worker whether it can commit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CanCommit {
    worker_id: WorkerId,
}

impl CanCommit {
    pub fn new(worker_id: WorkerId) -> Self {
        CanCommit { worker_id }
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }
}

impl Display for CanCommit {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "can-commit({})", self.worker_id)
    }
}

impl Message for CanCommit {}

/// The coordinator's binding outcome, addressed to one worker.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Decision {
    worker_id: WorkerId,
    outcome: Outcome,
}

impl Decision {
    pub fn new(worker_id: WorkerId, outcome: Outcome) -> Self {
        Decision { worker_id, outcome }
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "decision({}: {})", self.worker_id, self.outcome)
    }
}

impl Message for Decision {}
