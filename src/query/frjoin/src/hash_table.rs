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

use frjoin_query_expression::Tuple;
use hashbrown::HashMap;
use hashbrown::hash_map::Iter;
use hashbrown::hash_map::Keys;

use crate::JoinKey;
use crate::ValueGroup;

/// Join key to value group mapping of one replicated input.
///
/// Tables only ever grow: there is no removal, and a repeated key appends
/// to the group created by its first occurrence.
#[derive(Debug)]
pub struct JoinHashTable {
    groups: HashMap<JoinKey, ValueGroup>,
    value_group_capacity: usize,
    num_values: usize,
}

impl JoinHashTable {
    pub fn with_capacity(capacity: usize, value_group_capacity: usize) -> Self {
        JoinHashTable {
            groups: HashMap::with_capacity(capacity),
            value_group_capacity,
            num_values: 0,
        }
    }

    pub fn get(&self, key: &JoinKey) -> Option<&ValueGroup> {
        self.groups.get(key)
    }

    pub fn put(&mut self, key: JoinKey, value: Tuple) {
        let value_group_capacity = self.value_group_capacity;
        self.groups
            .entry(key)
            .or_insert_with(|| ValueGroup::with_capacity(value_group_capacity))
            .append(value);
        self.num_values += 1;
    }

    pub fn contains_key(&self, key: &JoinKey) -> bool {
        self.groups.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of values over all groups.
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    pub fn keys(&self) -> Keys<'_, JoinKey, ValueGroup> {
        self.groups.keys()
    }

    pub fn iter(&self) -> Iter<'_, JoinKey, ValueGroup> {
        self.groups.iter()
    }
}
