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

use crate::ErrorCode;
use crate::Result;

pub trait ResultExt<T> {
    /// Prefix the error message with the context produced by `f`.
    ///
    /// The closure is only evaluated on the error path.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: AsRef<str>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where E: Into<ErrorCode>
{
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        self.map_err(|e| e.into().add_message(f()))
    }
}
