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

use std::error::Error;

use frjoin_common_exception::ErrorCode;
use frjoin_common_exception::Result;
use frjoin_common_exception::ResultExt;
use pretty_assertions::assert_eq;

#[test]
fn test_error_code_display() {
    let err = ErrorCode::HashTableNotReady("lookup before build");
    assert_eq!(err.code(), ErrorCode::HASH_TABLE_NOT_READY);
    assert_eq!(err.name(), "HashTableNotReady");
    assert_eq!(
        err.to_string(),
        "HashTableNotReady. Code: 4102, Text = lookup before build."
    );
}

#[test]
fn test_error_code_add_message() {
    let err = ErrorCode::BroadcastSourceError("connection reset")
        .add_message("while reading input 'scope-12'")
        .add_message_back(" (slot 2)");
    assert_eq!(
        err.message(),
        "while reading input 'scope-12': connection reset (slot 2)"
    );

    let err = ErrorCode::Internal("").add_message("empty text");
    assert_eq!(err.message(), "empty text");
}

#[test]
fn test_error_code_cause() {
    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated frame");
    let err = ErrorCode::BroadcastSourceError("read failed").set_cause(io);
    assert_eq!(err.message(), "read failed, cause: truncated frame");
    assert!(err.source().is_some());

    let cloned = err.clone();
    assert_eq!(cloned, err);
    assert_eq!(cloned.code(), ErrorCode::BROADCAST_SOURCE_ERROR);
}

#[test]
fn test_error_code_from_std() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err: ErrorCode = io.into();
    assert_eq!(err.code(), ErrorCode::IO_ERROR);
    assert!(err.message().starts_with("pipe closed"));

    let err: ErrorCode = anyhow::anyhow!("outer").into();
    assert_eq!(err.code(), ErrorCode::INTERNAL);
    assert_eq!(err.message(), "outer");
}

#[test]
fn test_error_code_from_anyhow_chain() {
    fn fetch() -> anyhow::Result<u64> {
        let port = "70000".parse::<u16>()?;
        Ok(u64::from(port))
    }

    let chained = fetch().map_err(|e| e.context("resolve broadcast endpoint"));
    let err = chained.with_context(|| "attach input 'scope-3'").unwrap_err();
    assert_eq!(err.code(), ErrorCode::INTERNAL);
    assert_eq!(
        err.message(),
        "attach input 'scope-3', cause: resolve broadcast endpoint: number too large to fit in target type"
    );
    assert!(err.cause().is_some());

    let err: ErrorCode = "x1".parse::<u8>().unwrap_err().into();
    assert_eq!(err.code(), ErrorCode::BAD_ARGUMENTS);
}

#[test]
fn test_result_with_context() {
    fn read() -> Result<u64> {
        let value: std::result::Result<u64, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk unplugged",
        ));
        value.with_context(|| "reading broadcast input 'a'")
    }

    let err = read().unwrap_err();
    assert_eq!(err.code(), ErrorCode::IO_ERROR);
    assert!(
        err.message()
            .starts_with("reading broadcast input 'a': disk unplugged")
    );

    let ok: Result<u64> = Ok(7);
    assert_eq!(ok.with_context(|| "unused").unwrap(), 7);
}
