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

use crate::algorithm::Action;

use super::CoordinatorContext;
use super::Decision;
use super::Outcome;
use super::WorkerId;

/// An instruction produced by [`CoordinatorAlgorithm`](super::CoordinatorAlgorithm).
///
/// Actions are returned in the order they must be carried out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoordinatorAction {
    /// Replace the stored context with this one.
    Update { context: CoordinatorContext },
    /// Send a decision on the outbound decision channel.
    SendDecision(Decision),
    /// Publish the round's outcome on the caller's result channel.
    PublishOutcome(Outcome),
    Notify(CoordinatorActionNotification),
}

impl Action for CoordinatorAction {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoordinatorActionNotification {
    AckReceived(WorkerId),
    MessageDropped(String),
}
