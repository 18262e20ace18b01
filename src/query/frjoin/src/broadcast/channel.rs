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

use async_channel::Receiver;
use async_channel::Sender;
use frjoin_common_exception::Result;

use crate::broadcast::BroadcastRecord;
use crate::broadcast::BroadcastSource;

/// Producer half of a [`ChannelSource`].
///
/// The producer sends `Err` to report that the input can not be delivered
/// completely, and drops the sender once every record is sent.
pub type BroadcastSender = Sender<Result<BroadcastRecord>>;

/// A broadcast input delivered over a channel by another thread or task.
pub struct ChannelSource {
    rx: Receiver<Result<BroadcastRecord>>,
}

/// Create a channel backed broadcast input, unbounded when `capacity` is `None`.
pub fn broadcast_channel(capacity: Option<usize>) -> (BroadcastSender, Box<dyn BroadcastSource>) {
    let (tx, rx) = match capacity {
        Some(capacity) => async_channel::bounded(capacity.max(1)),
        None => async_channel::unbounded(),
    };

    (tx, Box::new(ChannelSource { rx }))
}

impl BroadcastSource for ChannelSource {
    fn next_record(&mut self) -> Result<Option<BroadcastRecord>> {
        match self.rx.recv_blocking() {
            Ok(Ok(record)) => Ok(Some(record)),
            Ok(Err(cause)) => Err(cause),
            // Closed and drained: every sender is gone.
            Err(_) => Ok(None),
        }
    }
}
