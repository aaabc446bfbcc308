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

//! Contains AlgorithmError

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FormatResult};

use super::InternalError;
use super::InvalidStateError;

/// An error returned by [`Algorithm::event`](crate::algorithm::Algorithm::event).
///
/// Protocol anomalies such as a surplus vote are not errors; they are reported through a
/// notification action. An `AlgorithmError` means the event and context passed in could not be
/// reconciled at all.
#[derive(Debug)]
pub enum AlgorithmError {
    /// The context is not one the event can be applied to, for example a round sized for zero
    /// workers.
    InvalidState(InvalidStateError),

    /// An unexpected failure inside the algorithm.
    ///
    /// [`CoordinatorAlgorithm`](crate::two_phase_commit::CoordinatorAlgorithm) never returns this
    /// variant. It exists for [`Algorithm`](crate::algorithm::Algorithm) implementations which
    /// depend on fallible resources, and runtimes must still handle it.
    Internal(InternalError),
}

impl Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AlgorithmError::InvalidState(e) => Some(e),
            AlgorithmError::Internal(e) => Some(e),
        }
    }
}

impl Display for AlgorithmError {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        match self {
            AlgorithmError::InvalidState(e) => write!(f, "invalid algorithm state: {}", e),
            AlgorithmError::Internal(e) => write!(f, "{}", e),
        }
    }
}

impl From<InvalidStateError> for AlgorithmError {
    fn from(err: InvalidStateError) -> Self {
        AlgorithmError::InvalidState(err)
    }
}

impl From<InternalError> for AlgorithmError {
    fn from(err: InternalError) -> Self {
        AlgorithmError::Internal(err)
    }
}
