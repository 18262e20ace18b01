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

use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;

/// Create a non blocking writer over an hourly rolling file.
///
/// Buffered lines are flushed when the returned guard drops.
pub(crate) fn new_file_log_writer(dir: &str, name: impl ToString) -> (NonBlocking, WorkerGuard) {
    let rolling = RollingFileAppender::new(Rotation::HOURLY, dir, name.to_string());
    tracing_appender::non_blocking(rolling)
}
