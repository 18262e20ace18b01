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

use std::vec::IntoIter;

use frjoin_common_exception::Result;
use frjoin_query_expression::Scalar;
use frjoin_query_expression::Tuple;

/// Key of a broadcast record, tagged with the logical input it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedKey {
    pub index: u8,
    pub key: Scalar,
}

impl IndexedKey {
    pub fn new(index: u8, key: impl Into<Scalar>) -> Self {
        IndexedKey {
            index,
            key: key.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.key.is_null()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastRecord {
    pub key: IndexedKey,
    pub value: Tuple,
}

impl BroadcastRecord {
    pub fn new(key: IndexedKey, value: Tuple) -> Self {
        BroadcastRecord { key, value }
    }
}

/// Streaming reader of one replicated input.
///
/// `next_record` blocks until a record is available. `Ok(None)` means the
/// input is exhausted; an error means the input can not be read to the end.
/// Each source has exactly one consumer.
pub trait BroadcastSource: Send {
    fn next_record(&mut self) -> Result<Option<BroadcastRecord>>;
}

/// A broadcast input whose records are already materialized in memory.
pub struct MemorySource {
    records: IntoIter<BroadcastRecord>,
}

impl MemorySource {
    pub fn create(records: Vec<BroadcastRecord>) -> Box<dyn BroadcastSource> {
        Box::new(MemorySource {
            records: records.into_iter(),
        })
    }
}

impl BroadcastSource for MemorySource {
    fn next_record(&mut self) -> Result<Option<BroadcastRecord>> {
        Ok(self.records.next())
    }
}
