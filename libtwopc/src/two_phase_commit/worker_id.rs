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

use std::fmt::{Display, Formatter, Result as FormatResult};

/// Identifies one worker taking part in a round.
///
/// The coordinator numbers its workers sequentially starting at 1.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WorkerId(usize);

impl WorkerId {
    pub fn new(id: usize) -> Self {
        WorkerId(id)
    }

    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns the ids `1..=number_of_workers` in ascending order.
    pub fn sequence(number_of_workers: usize) -> impl Iterator<Item = WorkerId> {
        (1..=number_of_workers).map(WorkerId)
    }
}

impl From<usize> for WorkerId {
    fn from(id: usize) -> Self {
        WorkerId(id)
    }
}

impl Display for WorkerId {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "worker {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one_and_ascends() {
        let ids: Vec<usize> = WorkerId::sequence(4).map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(WorkerId::sequence(0).count(), 0);
    }
}
