// Copyright 2021 Cargill Incorporated
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

use crate::algorithm::Context;

use super::Outcome;
use super::Vote;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordinatorState {
    /// Waiting for votes; the tally holds fewer than `number_of_workers` entries.
    Collecting,
    /// Every vote is in and the outcome has been published. Only acks are consumed from here on.
    Decided(Outcome),
}

/// The state of one round, owned by whoever drives the algorithm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoordinatorContext {
    number_of_workers: usize,
    votes: Vec<Vote>,
    state: CoordinatorState,
}

impl CoordinatorContext {
    pub fn new(number_of_workers: usize) -> Self {
        CoordinatorContext {
            number_of_workers,
            votes: Vec::new(),
            state: CoordinatorState::Collecting,
        }
    }

    pub fn number_of_workers(&self) -> usize {
        self.number_of_workers
    }

    /// The tally, in the order the votes were received.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn state(&self) -> &CoordinatorState {
        &self.state
    }

    pub fn set_state(&mut self, state: CoordinatorState) {
        self.state = state;
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            CoordinatorState::Collecting => None,
            CoordinatorState::Decided(outcome) => Some(outcome),
        }
    }

    /// Appends a vote to the tally. Votes are kept in arrival order and are not deduplicated.
    ///
    /// The tally grows one vote at a time; nothing is reserved up front for `number_of_workers`.
    pub fn record_vote(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    pub fn is_tally_complete(&self) -> bool {
        self.votes.len() >= self.number_of_workers
    }
}

impl Context for CoordinatorContext {}
