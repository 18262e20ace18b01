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
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

pub type Result<T, E = ErrorCode> = std::result::Result<T, E>;

/// The error type shared by every crate of the workspace.
///
/// An `ErrorCode` is cheap to clone, so a failure can be stored and
/// re-raised on every later call that observes it.
#[derive(Clone)]
pub struct ErrorCode {
    code: u16,
    name: &'static str,
    display_text: String,
    cause: Option<Arc<dyn Error + Send + Sync + 'static>>,
}

impl ErrorCode {
    pub(crate) fn create(code: u16, name: &'static str, display_text: String) -> ErrorCode {
        ErrorCode {
            code,
            name,
            display_text,
            cause: None,
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> String {
        match &self.cause {
            None => self.display_text.clone(),
            Some(cause) if self.display_text.is_empty() => cause.to_string(),
            Some(cause) => format!("{}, cause: {}", self.display_text, cause),
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Prepend `msg` to the display text, separated by a colon.
    pub fn add_message(self, msg: impl AsRef<str>) -> Self {
        let msg = msg.as_ref();
        let display_text = if self.display_text.is_empty() {
            msg.to_string()
        } else {
            format!("{}: {}", msg, self.display_text)
        };
        Self {
            display_text,
            ..self
        }
    }

    /// Append `msg` to the display text verbatim.
    pub fn add_message_back(self, msg: impl AsRef<str>) -> Self {
        Self {
            display_text: format!("{}{}", self.display_text, msg.as_ref()),
            ..self
        }
    }

    pub fn set_cause<E>(self, cause: E) -> Self
    where E: Error + Send + Sync + 'static {
        Self {
            cause: Some(Arc::new(cause)),
            ..self
        }
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. Code: {}, Text = {}.",
            self.name,
            self.code,
            self.message()
        )
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. Code: {}, Text = {}.",
            self.name,
            self.code,
            self.message()
        )
    }
}

impl Error for ErrorCode {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message() == other.message()
    }
}
