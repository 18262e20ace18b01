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

#![allow(non_snake_case)]

use crate::ErrorCode;

macro_rules! build_exceptions {
    ($($(#[$meta:meta])* $body:ident($code:expr)),* $(,)?) => {
        impl ErrorCode {
            $(
                paste::item! {
                    $(#[$meta])*
                    pub const [< $body:snake:upper >]: u16 = $code;
                }

                $(#[$meta])*
                pub fn $body(display_text: impl Into<String>) -> ErrorCode {
                    ErrorCode::create($code, stringify!($body), display_text.into())
                }
            )*
        }
    }
}

// Common errors [0, 2000].
build_exceptions! {
    Ok(0),
    /// An invariant of the engine is violated; always a bug.
    Internal(1001),
    IoError(1003),
    BadArguments(1006),
    BadDataValueType(1010),
}

// Configuration errors [2700, 2800).
build_exceptions! {
    InvalidConfig(2701),
}

// Replicated join errors [4000, 4200).
build_exceptions! {
    /// A named input is absent from the runtime input registry.
    UnknownInput(4001),
    /// A named input exists but is not a broadcast input.
    IllegalInputKind(4002),
    /// The build was requested before inputs were attached.
    InputsNotAttached(4003),
    /// A broadcast source failed while the hash tables were being built.
    BroadcastSourceError(4101),
    /// A probe was issued before every hash table was built.
    HashTableNotReady(4102),
    /// A previous build failed; the engine can no longer serve probes.
    HashTableBuildFailed(4103),
}
