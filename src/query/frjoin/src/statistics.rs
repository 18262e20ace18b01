// Copyright 2021 Datafuse Labs
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

use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;

/// What the build read from one broadcast input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildStatistics {
    pub input: String,
    pub slot: usize,
    pub rows_read: u64,
    pub null_keys: u64,
    pub distinct_keys: usize,
    pub num_values: usize,
    pub elapsed: Duration,
}

impl BuildStatistics {
    pub fn new(input: &str, slot: usize) -> Self {
        BuildStatistics {
            input: input.to_string(),
            slot,
            rows_read: 0,
            null_keys: 0,
            distinct_keys: 0,
            num_values: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl Display for BuildStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input={}, slot={}, rows_read={}, null_keys={}, distinct_keys={}, values={}, elapsed={:?}",
            self.input,
            self.slot,
            self.rows_read,
            self.null_keys,
            self.distinct_keys,
            self.num_values,
            self.elapsed
        )
    }
}
