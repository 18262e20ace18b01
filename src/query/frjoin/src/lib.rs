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

//! Build side of the fragment-replicate (broadcast) hash join.
//!
//! Every replicated input of the join is broadcast to each worker, drained
//! into a per-input [`JoinHashTable`] and then probed by the fragmented
//! input, which is streamed through the worker record by record.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::len_without_is_empty)]

pub mod broadcast;
mod engine;
mod hash_table;
mod key_codec;
mod local_rearrange;
mod slot;
mod statistics;
mod value_group;

pub use engine::EngineState;
pub use engine::FrJoinDesc;
pub use engine::FrJoinEngine;
pub use engine::Heartbeat;
pub use hash_table::JoinHashTable;
pub use key_codec::JoinKey;
pub use key_codec::KeyCodec;
pub use local_rearrange::LocalRearrange;
pub use local_rearrange::ValueExtractor;
pub use slot::adjusted_index;
pub use slot::replicated_slots;
pub use statistics::BuildStatistics;
pub use value_group::MAX_PREALLOCATED_VALUES;
pub use value_group::ValueGroup;
