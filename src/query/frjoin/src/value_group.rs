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

use std::slice::Iter;

use frjoin_query_expression::Tuple;

/// Upper bound on the values a group pre-allocates, whatever the hint.
pub const MAX_PREALLOCATED_VALUES: usize = 1 << 16;

/// The values of one replicated input sharing one join key.
///
/// Values are kept in arrival order. A group only grows while its hash
/// table is being built and is read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueGroup {
    values: Vec<Tuple>,
}

impl ValueGroup {
    /// `capacity` only pre-sizes the group: appending past it always succeeds.
    pub fn with_capacity(capacity: usize) -> Self {
        ValueGroup {
            values: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_VALUES)),
        }
    }

    #[inline]
    pub fn append(&mut self, value: Tuple) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Tuple] {
        &self.values
    }

    pub fn iter(&self) -> Iter<'_, Tuple> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValueGroup {
    type Item = &'a Tuple;
    type IntoIter = Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
