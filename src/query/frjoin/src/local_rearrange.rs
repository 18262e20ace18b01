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

use frjoin_common_exception::ErrorCode;
use frjoin_common_exception::Result;
use frjoin_query_expression::IndexedTuple;
use frjoin_query_expression::Scalar;
use frjoin_query_expression::Tuple;

/// Turns the `(index, key, value)` shape of a replicated record into the
/// tuple that is stored in the hash table and handed to the probe loop.
pub trait ValueExtractor: Send + Sync {
    fn extract(&self, record: IndexedTuple) -> Result<Tuple>;
}

impl<F> ValueExtractor for F
where F: Fn(IndexedTuple) -> Result<Tuple> + Send + Sync
{
    fn extract(&self, record: IndexedTuple) -> Result<Tuple> {
        self(record)
    }
}

/// Undoes the upstream local rearrange of one join input.
///
/// Upstream, the key columns of every record were projected into the key
/// and removed from the value. `LocalRearrange` puts them back at their
/// original positions so the joined value is the full input record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalRearrange {
    /// `key_positions[i]` is the column of key field `i` in the input record.
    key_positions: Vec<usize>,
}

impl LocalRearrange {
    /// The value already is the full record.
    pub fn identity() -> Self {
        LocalRearrange {
            key_positions: vec![],
        }
    }

    pub fn try_create(key_positions: Vec<usize>) -> Result<Self> {
        let mut sorted = key_positions.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(ErrorCode::BadArguments(format!(
                "duplicated key position in local rearrange: {:?}",
                key_positions
            )));
        }

        Ok(LocalRearrange { key_positions })
    }

    pub fn key_positions(&self) -> &[usize] {
        &self.key_positions
    }

    fn key_fields(&self, key: Scalar) -> Result<Vec<Scalar>> {
        if self.key_positions.len() == 1 {
            return Ok(vec![key]);
        }

        match key {
            Scalar::Tuple(fields) if fields.len() == self.key_positions.len() => Ok(fields),
            other => Err(ErrorCode::BadDataValueType(format!(
                "local rearrange expects a key of {} fields, got {}",
                self.key_positions.len(),
                other
            ))),
        }
    }
}

impl ValueExtractor for LocalRearrange {
    fn extract(&self, record: IndexedTuple) -> Result<Tuple> {
        if self.key_positions.is_empty() {
            return Ok(record.value);
        }

        let arity = record.value.len() + self.key_positions.len();
        let mut slots: Vec<Option<Scalar>> = vec![None; arity];
        for (position, field) in self
            .key_positions
            .iter()
            .zip(self.key_fields(record.key)?)
        {
            match slots.get_mut(*position) {
                Some(slot) => *slot = Some(field),
                None => {
                    return Err(ErrorCode::BadDataValueType(format!(
                        "key position {} is out of range for a record of {} fields",
                        position, arity
                    )));
                }
            }
        }

        let mut values = record.value.into_fields().into_iter();
        slots
            .into_iter()
            .map(|slot| match slot {
                Some(key_field) => Ok(key_field),
                None => values
                    .next()
                    .ok_or_else(|| ErrorCode::Internal("value fields exhausted")),
            })
            .collect::<Result<Tuple>>()
    }
}
