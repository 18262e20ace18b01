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

use std::collections::BTreeMap;

use frjoin_common_exception::ErrorCode;
use frjoin_common_exception::Result;
use itertools::Itertools;

use crate::broadcast::BroadcastSource;

/// An input handed to a task by the runtime.
pub enum LogicalInput {
    Broadcast(Box<dyn BroadcastSource>),
    /// Any input the join can not read its replicated sides from, e.g. a
    /// sorted shuffle. `kind` names it in error messages.
    Other { kind: String },
}

impl LogicalInput {
    pub fn kind(&self) -> &str {
        match self {
            LogicalInput::Broadcast(_) => "broadcast",
            LogicalInput::Other { kind } => kind,
        }
    }
}

/// Inputs of a task, by the name the plan gave them.
#[derive(Default)]
pub struct InputRegistry {
    inputs: BTreeMap<String, LogicalInput>,
}

impl InputRegistry {
    pub fn create() -> Self {
        InputRegistry::default()
    }

    pub fn register(&mut self, name: impl Into<String>, input: LogicalInput) {
        self.inputs.insert(name.into(), input);
    }

    pub fn register_broadcast(&mut self, name: impl Into<String>, source: Box<dyn BroadcastSource>) {
        self.register(name, LogicalInput::Broadcast(source));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(|name| name.as_str())
    }

    /// Move the broadcast source registered as `name` out of the registry.
    pub fn take_broadcast(&mut self, name: &str) -> Result<Box<dyn BroadcastSource>> {
        match self.inputs.remove(name) {
            Some(LogicalInput::Broadcast(source)) => Ok(source),
            Some(other) => {
                let kind = other.kind().to_string();
                self.inputs.insert(name.to_string(), other);
                Err(ErrorCode::IllegalInputKind(format!(
                    "input '{}' is a {} input, expect a broadcast input",
                    name, kind
                )))
            }
            None => Err(ErrorCode::UnknownInput(format!(
                "input '{}' is not found, available inputs: [{}]",
                name,
                self.inputs.keys().join(", ")
            ))),
        }
    }
}
