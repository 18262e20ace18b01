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

//! Broadcast inputs of the replicated join sides and their wiring.

mod channel;
mod kv_reader;
mod registry;
mod source;

pub use channel::BroadcastSender;
pub use channel::ChannelSource;
pub use channel::broadcast_channel;
pub use kv_reader::KeyValueReader;
pub use kv_reader::KeyValueReaderSource;
pub use registry::InputRegistry;
pub use registry::LogicalInput;
pub use source::BroadcastRecord;
pub use source::BroadcastSource;
pub use source::IndexedKey;
pub use source::MemorySource;
