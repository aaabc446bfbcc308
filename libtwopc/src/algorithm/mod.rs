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

//! The sans-IO algorithm abstraction.
//!
//! An [`Algorithm`] never touches a channel, a clock, or a task. It is handed one event along with
//! the current context and answers with the ordered list of actions the caller must carry out.
//! Runtimes (such as [`Coordinator`](crate::two_phase_commit::Coordinator)) own the I/O and apply
//! those actions.

use crate::error::AlgorithmError;

pub trait Action {}
pub trait Context: Clone {}

pub trait Algorithm {
    type Event;
    type Action: Action;
    type Context: Context;

    /// Process a single event against `context`.
    ///
    /// The returned actions must be executed in order. A new context, if any, is carried inside
    /// one of the actions; the passed-in context is consumed.
    ///
    /// # Errors
    ///
    /// Returns an [`AlgorithmError`] if the event cannot be processed with the given context.
    fn event(
        &self,
        event: Self::Event,
        context: Self::Context,
    ) -> Result<Vec<Self::Action>, AlgorithmError>;
}
