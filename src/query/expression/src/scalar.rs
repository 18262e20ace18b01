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

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Deserialize;
use serde::Serialize;

/// `f64` with a total order: every NaN is equal to every other NaN and
/// `-0.0` equals `0.0`, for both `Eq` and `Hash`.
pub type F64 = OrderedFloat<f64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumberScalar {
    Int64(i64),
    UInt64(u64),
    Float64(F64),
}

/// A single typed field value.
///
/// Equality and hashing are structural: two scalars are equal iff they have
/// the same variant and equal payloads, nested tuples included.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Number(NumberScalar),
    String(String),
    Binary(Vec<u8>),
    Tuple(Vec<Scalar>),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_tuple(&self) -> Option<&[Scalar]> {
        match self {
            Scalar::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Scalar::Number(NumberScalar::Int64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Scalar::String(v) => Some(v),
            _ => None,
        }
    }
}

impl Display for NumberScalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberScalar::Int64(v) => write!(f, "{}", v),
            NumberScalar::UInt64(v) => write!(f, "{}", v),
            NumberScalar::Float64(v) => write!(f, "{:?}", v.0),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Null => write!(f, "NULL"),
            Scalar::Boolean(v) => write!(f, "{}", v),
            Scalar::Number(v) => write!(f, "{}", v),
            Scalar::String(v) => write!(f, "'{}'", v),
            Scalar::Binary(v) => {
                write!(f, "x'")?;
                for byte in v {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, "'")
            }
            Scalar::Tuple(fields) => write!(f, "({})", fields.iter().join(", ")),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(NumberScalar::Int64(v))
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::Number(NumberScalar::UInt64(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(NumberScalar::Float64(OrderedFloat(v)))
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(v: Vec<u8>) -> Self {
        Scalar::Binary(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        match v {
            None => Scalar::Null,
            Some(v) => v.into(),
        }
    }
}
