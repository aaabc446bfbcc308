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

//! Contains CoordinatorError

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FormatResult};

use super::AlgorithmError;
use super::InternalError;
use super::InvalidArgumentError;
use super::InvalidStateError;

/// An error returned by the [`Coordinator`](crate::two_phase_commit::Coordinator) runtime.
#[derive(Debug)]
pub enum CoordinatorError {
    /// An argument passed to the coordinator was rejected, such as a round of zero workers.
    InvalidArgument(InvalidArgumentError),

    /// The coordinator is in a state which does not permit the call: it was already started, it
    /// has shut down, or one of its channels has been closed by the other side.
    InvalidState(InvalidStateError),

    /// The decision loop failed unexpectedly.
    Internal(InternalError),
}

impl CoordinatorError {
    pub(crate) fn channel_closed(channel: &str) -> Self {
        CoordinatorError::InvalidState(InvalidStateError::with_message(format!(
            "{} channel is closed",
            channel
        )))
    }
}

impl Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CoordinatorError::InvalidArgument(e) => Some(e),
            CoordinatorError::InvalidState(e) => Some(e),
            CoordinatorError::Internal(e) => Some(e),
        }
    }
}

impl Display for CoordinatorError {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        match self {
            CoordinatorError::InvalidArgument(e) => write!(f, "{}", e),
            CoordinatorError::InvalidState(e) => write!(f, "{}", e),
            CoordinatorError::Internal(e) => write!(f, "{}", e),
        }
    }
}

impl From<InvalidArgumentError> for CoordinatorError {
    fn from(err: InvalidArgumentError) -> Self {
        CoordinatorError::InvalidArgument(err)
    }
}

impl From<InvalidStateError> for CoordinatorError {
    fn from(err: InvalidStateError) -> Self {
        CoordinatorError::InvalidState(err)
    }
}

impl From<InternalError> for CoordinatorError {
    fn from(err: InternalError) -> Self {
        CoordinatorError::Internal(err)
    }
}

impl From<AlgorithmError> for CoordinatorError {
    fn from(err: AlgorithmError) -> Self {
        match err {
            AlgorithmError::InvalidState(e) => CoordinatorError::InvalidState(e),
            AlgorithmError::Internal(e) => CoordinatorError::Internal(e),
        }
    }
}
