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

use super::{Ack, CoordinatorMessage, Vote};

/// An input to [`CoordinatorAlgorithm`](super::CoordinatorAlgorithm).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordinatorEvent {
    /// A message has arrived on one of the coordinator's inbound channels.
    Deliver(CoordinatorMessage),
}

impl From<Vote> for CoordinatorEvent {
    fn from(vote: Vote) -> Self {
        CoordinatorEvent::Deliver(CoordinatorMessage::Vote(vote))
    }
}

impl From<Ack> for CoordinatorEvent {
    fn from(ack: Ack) -> Self {
        CoordinatorEvent::Deliver(CoordinatorMessage::Ack(ack))
    }
}
