// Copyright 2021-2022 Cargill Incorporated
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

//! The coordinator side of the 2PC (Two-Phase Commit) atomic commitment protocol.
//!
//! A round has two phases. In the first, the coordinator sends a [`CanCommit`] poll to every
//! worker and waits until a [`Vote`] from each of them has arrived. In the second, it decides
//! [`Outcome::Commit`] if every vote was yes and [`Outcome::Abort`] otherwise, sends a
//! [`Decision`] to the workers, and publishes the outcome to the caller. Workers answer decisions
//! with an [`Ack`], which the coordinator drains but never acts upon.
//!
//! The protocol logic lives in [`CoordinatorAlgorithm`], which performs no I/O. [`Coordinator`]
//! wraps it in a tokio task that owns the vote tally and talks to the workers over channels.
//!
//! Only the workers that voted no are sent an abort decision; workers that voted yes in an
//! aborted round receive nothing. Callers that need every worker to learn the outcome must use the
//! published [`Outcome`].

mod coordinator;
mod coordinator_action;
mod coordinator_algorithm;
mod coordinator_builder;
mod coordinator_context;
mod coordinator_event;
mod coordinator_message;
mod participant_message;
mod worker_id;

pub use coordinator::{send_final_decision, Coordinator, CoordinatorHandle, CoordinatorStatus};
pub use coordinator_action::{CoordinatorAction, CoordinatorActionNotification};
pub use coordinator_algorithm::CoordinatorAlgorithm;
pub use coordinator_builder::CoordinatorBuilder;
pub use coordinator_context::{CoordinatorContext, CoordinatorState};
pub use coordinator_event::CoordinatorEvent;
pub use coordinator_message::{Ack, CoordinatorMessage, Vote, VoteValue};
pub use participant_message::{CanCommit, Decision, Outcome};
pub use worker_id::WorkerId;
