// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The tagged value model consumed by the encoder.

use std::fmt;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::array::NdArray;
use crate::frame::{DataFrame, Index, Series};

/// Opaque values the dispatcher cannot classify structurally.
///
/// `to_mapping` is consulted first; when it yields a map the value encodes
/// as a JSON object through the mapping driver. Otherwise the encoder falls
/// back to the configured default handler, and failing that iterates
/// `attributes`, skipping names that start with `_`.
pub trait ObjectLike: fmt::Debug + Send + Sync {
    /// Mapping representation of the value, if it has one.
    fn to_mapping(&self) -> Option<Vec<(Value, Value)>> {
        None
    }

    /// Public attributes of the value, in declaration order.
    fn attributes(&self) -> Vec<(String, Value)> {
        Vec::new()
    }
}

/// Any value the encoder accepts.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Byte string; must be valid UTF-8 to encode.
    Bytes(Bytes),
    /// Arbitrary-precision decimal, encoded lossily as a double.
    Decimal(BigDecimal),
    DateTime(NaiveDateTime),
    /// Encodes as midnight of that day.
    Date(NaiveDate),
    /// Encodes as an ISO-8601 time string.
    Time(NaiveTime),
    Timedelta(TimeDelta),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Iteration-ordered set contents, driven by the generic-iterator
    /// protocol (items are consumed as produced).
    Set(Vec<Value>),
    /// Insertion-ordered mapping; keys are coerced to JSON object keys at
    /// encode time.
    Map(Vec<(Value, Value)>),
    Index(Index),
    Series(Series),
    Frame(DataFrame),
    Array(NdArray),
    Object(Arc<dyn ObjectLike>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Timedelta(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<NdArray> for Value {
    fn from(v: NdArray) -> Self {
        Value::Array(v)
    }
}

impl From<Index> for Value {
    fn from(v: Index) -> Self {
        Value::Index(v)
    }
}

impl From<Series> for Value {
    fn from(v: Series) -> Self {
        Value::Series(v)
    }
}

impl From<DataFrame> for Value {
    fn from(v: DataFrame) -> Self {
        Value::Frame(v)
    }
}
