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

use frjoin_common_exception::Result;
use frjoin_query_expression::Tuple;

use crate::broadcast::BroadcastRecord;
use crate::broadcast::BroadcastSource;
use crate::broadcast::IndexedKey;

/// Cursor-style reader of a broadcast input, as exposed by shuffle runtimes.
///
/// `has_next` blocks and moves the cursor; the `current_*` accessors are
/// only valid after it returned `true`.
pub trait KeyValueReader: Send {
    fn has_next(&mut self) -> Result<bool>;

    fn current_key(&self) -> &IndexedKey;

    fn current_value(&self) -> &Tuple;
}

/// Adapts a [`KeyValueReader`] to the pull-based [`BroadcastSource`].
pub struct KeyValueReaderSource<R> {
    reader: R,
    finished: bool,
}

impl<R: KeyValueReader + 'static> KeyValueReaderSource<R> {
    pub fn create(reader: R) -> Box<dyn BroadcastSource> {
        Box::new(KeyValueReaderSource {
            reader,
            finished: false,
        })
    }
}

impl<R: KeyValueReader> BroadcastSource for KeyValueReaderSource<R> {
    fn next_record(&mut self) -> Result<Option<BroadcastRecord>> {
        // Readers are not required to keep answering after exhaustion.
        if self.finished {
            return Ok(None);
        }

        if !self.reader.has_next()? {
            self.finished = true;
            return Ok(None);
        }

        Ok(Some(BroadcastRecord::new(
            self.reader.current_key().clone(),
            self.reader.current_value().clone(),
        )))
    }
}
