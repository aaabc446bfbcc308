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

//! Message trait

use std::fmt::{Debug, Display};

/// A message exchanged between the coordinator and its workers.
///
/// [`Message`]s travel over channels owned by the transport. The transport is assumed to be
/// reliable and to preserve order; a message is created when it is sent and discarded once it is
/// delivered.
pub trait Message: Clone + Debug + Display + Send + 'static {}
