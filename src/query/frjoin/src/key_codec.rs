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

use frjoin_query_config::NullKeyPolicy;
use frjoin_query_expression::Scalar;
use itertools::Itertools;

use crate::broadcast::IndexedKey;

/// Canonical form of a join key: its ordered field values.
///
/// Keys compare and hash by value, so two keys built from equal field
/// sequences always land in the same value group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinKey(Vec<Scalar>);

impl JoinKey {
    pub fn new(fields: Vec<Scalar>) -> Self {
        JoinKey(fields)
    }

    pub fn fields(&self) -> &[Scalar] {
        &self.0
    }

    pub fn num_fields(&self) -> usize {
        self.0.len()
    }
}

impl Display for JoinKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// Turns raw key values into [`JoinKey`]s and decides which keys are null.
///
/// A tuple key is flattened into its fields, any other scalar becomes a
/// single-field key. Null keys never join and are dropped by the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyCodec {
    policy: NullKeyPolicy,
}

impl KeyCodec {
    pub fn new(policy: NullKeyPolicy) -> Self {
        KeyCodec { policy }
    }

    pub fn policy(&self) -> NullKeyPolicy {
        self.policy
    }

    pub fn encode(&self, key: &Scalar) -> JoinKey {
        match key {
            Scalar::Tuple(fields) => JoinKey(fields.clone()),
            other => JoinKey(vec![other.clone()]),
        }
    }

    pub fn extract_key(&self, key: &IndexedKey) -> JoinKey {
        self.encode(&key.key)
    }

    /// An empty key has no null field, so it is only null when the whole
    /// key must be null.
    pub fn is_null(&self, key: &JoinKey) -> bool {
        match key.fields() {
            [field] => field.is_null(),
            fields => match self.policy {
                NullKeyPolicy::AnyField => fields.iter().any(Scalar::is_null),
                NullKeyPolicy::WholeKey => fields.iter().all(Scalar::is_null),
            },
        }
    }

    /// Canonical key of `key`, or `None` if it is null under the policy.
    pub fn decode(&self, key: &IndexedKey) -> Option<JoinKey> {
        self.encode_non_null(&key.key)
    }

    pub fn encode_non_null(&self, key: &Scalar) -> Option<JoinKey> {
        let key = self.encode(key);
        if self.is_null(&key) { None } else { Some(key) }
    }
}
