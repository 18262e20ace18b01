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

use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Index;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::Scalar;

/// An ordered, arbitrary-arity record of one join input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tuple(Vec<Scalar>);

impl Tuple {
    pub fn new(fields: Vec<Scalar>) -> Self {
        Tuple(fields)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tuple(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scalar> {
        self.0.get(index)
    }

    pub fn push(&mut self, field: Scalar) {
        self.0.push(field);
    }

    pub fn fields(&self) -> &[Scalar] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<Scalar> {
        self.0
    }
}

impl Index<usize> for Tuple {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Scalar>> for Tuple {
    fn from(fields: Vec<Scalar>) -> Self {
        Tuple(fields)
    }
}

impl FromIterator<Scalar> for Tuple {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Tuple(iter.into_iter().collect())
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// The `(index, key, value)` shape a local rearrange emits for one record.
///
/// `index` tags the logical input the record belongs to, `key` is the
/// projected join key and `value` holds the remaining fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedTuple {
    pub index: u8,
    pub key: Scalar,
    pub value: Tuple,
}

impl IndexedTuple {
    pub fn new(index: u8, key: Scalar, value: Tuple) -> Self {
        IndexedTuple { index, key, value }
    }
}

impl Display for IndexedTuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.index, self.key, self.value)
    }
}
