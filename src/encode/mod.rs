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

//! The encoder: option handling, the per-value type dispatcher and the
//! container drivers.
//!
//! [`Encoder`] carries the per-call options; [`Ctx`] is the per-call state
//! (output buffer, current orientation, recursion depth). Dispatch is a
//! single match over [`Value`] that either runs a primitive coercer or one
//! of the container drivers in the submodules.

use std::mem;
use std::str::FromStr;
use std::sync::Arc;

use snafu::ensure;

use crate::array::Leaf;
use crate::error::{
    Error, HandlerSnafu, InvalidOptionSnafu, InvalidPrecisionSnafu, RecursionLimitSnafu, Result,
};
use crate::value::{ObjectLike, Value};
use crate::writer::JsonWriter;

mod datetime;
mod frame;
mod labels;
mod scalar;
mod strider;

/// Largest accepted `double_precision`.
pub const MAX_DOUBLE_PRECISION: u8 = 15;

const DEFAULT_DOUBLE_PRECISION: u8 = 10;
const MAX_RECURSION: usize = 1024;

/// How a table (or vector) maps onto a JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orient {
    /// `{"columns": [...], "index": [...], "data": [[...], ...]}`
    Split,
    /// `[{column: value, ...}, ...]`, one object per row.
    Records,
    /// `{row: {column: value, ...}, ...}`
    Index,
    /// `{column: {row: value, ...}, ...}`
    #[default]
    Columns,
    /// `[[value, ...], ...]`, bare data.
    Values,
}

impl FromStr for Orient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "split" => Ok(Orient::Split),
            "records" => Ok(Orient::Records),
            "index" => Ok(Orient::Index),
            "columns" => Ok(Orient::Columns),
            "values" => Ok(Orient::Values),
            other => InvalidOptionSnafu {
                option: "orient",
                value: other,
            }
            .fail(),
        }
    }
}

/// Precision of epoch integers and ISO-8601 fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateUnit {
    Seconds,
    #[default]
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl DateUnit {
    /// Rescale nanoseconds to this unit, truncating toward zero.
    pub(crate) fn scale_nanos(self, nanos: i64) -> i64 {
        match self {
            DateUnit::Seconds => nanos / 1_000_000_000,
            DateUnit::Milliseconds => nanos / 1_000_000,
            DateUnit::Microseconds => nanos / 1_000,
            DateUnit::Nanoseconds => nanos,
        }
    }
}

impl FromStr for DateUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" => Ok(DateUnit::Seconds),
            "ms" => Ok(DateUnit::Milliseconds),
            "us" => Ok(DateUnit::Microseconds),
            "ns" => Ok(DateUnit::Nanoseconds),
            other => InvalidOptionSnafu {
                option: "date_unit",
                value: other,
            }
            .fail(),
        }
    }
}

/// Callable invoked for values the dispatcher cannot classify; its result is
/// encoded in place of the original value.
pub type DefaultHandler = Arc<dyn Fn(&Value) -> std::result::Result<Value, String> + Send + Sync>;

/// Construct an [`Encoder`] to turn [`Value`]s into JSON text.
///
/// Option validation happens up front in [`Encoder::encode`]; a failed call
/// produces no output.
#[derive(Clone)]
pub struct Encoder {
    orient: Orient,
    double_precision: u8,
    ensure_ascii: bool,
    escape_html: bool,
    date_unit: DateUnit,
    iso_dates: bool,
    default_handler: Option<DefaultHandler>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            orient: Orient::default(),
            double_precision: DEFAULT_DOUBLE_PRECISION,
            ensure_ascii: true,
            escape_html: false,
            date_unit: DateUnit::default(),
            iso_dates: false,
            default_handler: None,
        }
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table/vector orientation. Default is [`Orient::Columns`].
    pub fn with_orient(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }

    /// Digits after the decimal point for doubles, at most
    /// [`MAX_DOUBLE_PRECISION`]. Default is `10`.
    pub fn with_double_precision(mut self, digits: u8) -> Self {
        self.double_precision = digits;
        self
    }

    /// Escape every non-ASCII character as `\uXXXX`. Default is `true`.
    pub fn with_ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }

    /// Escape `<`, `>` and `&` for safe HTML embedding. Default is `false`.
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Unit for epoch integers and ISO fractional digits. Default is
    /// [`DateUnit::Milliseconds`].
    pub fn with_date_unit(mut self, date_unit: DateUnit) -> Self {
        self.date_unit = date_unit;
        self
    }

    /// Render datetimes as ISO-8601 strings instead of epoch integers.
    /// Default is `false`.
    pub fn with_iso_dates(mut self, iso_dates: bool) -> Self {
        self.iso_dates = iso_dates;
        self
    }

    /// Handler for values the dispatcher cannot classify.
    pub fn with_default_handler(mut self, handler: DefaultHandler) -> Self {
        self.default_handler = Some(handler);
        self
    }

    /// Encode `value` to a JSON string.
    pub fn encode(&self, value: &Value) -> Result<String> {
        ensure!(
            self.double_precision <= MAX_DOUBLE_PRECISION,
            InvalidPrecisionSnafu {
                value: self.double_precision,
            }
        );
        let mut ctx = self.context();
        ctx.encode_value(value)?;
        Ok(ctx.w.finish())
    }

    fn context(&self) -> Ctx<'_> {
        Ctx {
            w: JsonWriter::new(self.double_precision, self.ensure_ascii, self.escape_html),
            orient: self.orient,
            date_unit: self.date_unit,
            iso_dates: self.iso_dates,
            handler: self.default_handler.as_ref(),
            depth: 0,
        }
    }
}

/// Encode `value` with default options.
pub fn to_string(value: &Value) -> Result<String> {
    Encoder::new().encode(value)
}

/// Per-call encoder state.
pub(crate) struct Ctx<'a> {
    pub(crate) w: JsonWriter,
    pub(crate) orient: Orient,
    pub(crate) date_unit: DateUnit,
    pub(crate) iso_dates: bool,
    handler: Option<&'a DefaultHandler>,
    depth: usize,
}

impl Ctx<'_> {
    /// Run `f` under `orient`, restoring the previous orientation on every
    /// exit path.
    pub(crate) fn with_orient<T>(
        &mut self,
        orient: Orient,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = mem::replace(&mut self.orient, orient);
        let result = f(self);
        self.orient = saved;
        result
    }

    /// The type dispatcher: classify `value` and run its coercer or driver.
    pub(crate) fn encode_value(&mut self, value: &Value) -> Result<()> {
        ensure!(self.depth < MAX_RECURSION, RecursionLimitSnafu);
        self.depth += 1;
        let result = self.dispatch(value);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Bool(v) => self.w.bool(*v),
            Value::Null => self.w.null(),
            Value::Int(v) => self.w.long(*v),
            Value::UInt(v) => self.w.ulong(*v),
            Value::Float(v) => self.w.optional_double(*v),
            Value::Bytes(v) => return scalar::encode_bytes(self, v),
            Value::Str(v) => self.w.string(v),
            Value::Decimal(v) => self.w.optional_double(scalar::decimal_to_double(v)),
            Value::DateTime(v) => return datetime::encode_datetime(self, v),
            Value::Date(v) => return datetime::encode_date(self, v),
            Value::Time(v) => return datetime::encode_time(self, v),
            Value::Timedelta(v) => return datetime::encode_timedelta(self, v),
            Value::Index(v) => return frame::encode_index(self, v),
            Value::Series(v) => return frame::encode_series(self, v),
            Value::Array(v) => return strider::encode_view(self, v, None),
            Value::Frame(v) => return frame::encode_frame(self, v),
            Value::Map(entries) => return self.encode_map(entries),
            Value::List(items) | Value::Tuple(items) => return self.encode_elements(items),
            Value::Set(items) => return self.encode_elements(items),
            Value::Object(object) => return self.encode_opaque(value, object.as_ref()),
        }
        Ok(())
    }

    fn encode_elements(&mut self, items: &[Value]) -> Result<()> {
        self.w.begin_array();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.w.item_sep();
            }
            self.encode_value(item)?;
        }
        self.w.end_array();
        Ok(())
    }

    fn encode_map(&mut self, entries: &[(Value, Value)]) -> Result<()> {
        self.w.begin_object();
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.w.item_sep();
            }
            let key = labels::key_for_value(self, key)?;
            self.w.raw_key(&key);
            self.encode_value(value)?;
        }
        self.w.end_object();
        Ok(())
    }

    fn encode_opaque(&mut self, original: &Value, object: &dyn ObjectLike) -> Result<()> {
        if let Some(entries) = object.to_mapping() {
            return self.encode_map(&entries);
        }
        if let Some(handler) = self.handler {
            let replacement = match handler.as_ref()(original) {
                Ok(replacement) => replacement,
                Err(msg) => return HandlerSnafu { msg }.fail(),
            };
            return self.encode_value(&replacement);
        }
        let attributes = object.attributes();
        self.w.begin_object();
        let mut first = true;
        for (name, value) in &attributes {
            if name.starts_with('_') {
                continue;
            }
            if !first {
                self.w.item_sep();
            }
            first = false;
            self.w.key(name);
            self.encode_value(value)?;
        }
        self.w.end_object();
        Ok(())
    }
}

/// Classify one materialised array element and emit it.
///
/// Shared by the strider's leaf phase and the scalar paths so that datetime
/// long-vs-string classification cannot diverge between them.
pub(crate) fn encode_leaf(ctx: &mut Ctx<'_>, leaf: Leaf<'_>) -> Result<()> {
    match leaf {
        Leaf::Float(v) => ctx.w.optional_double(v),
        Leaf::Datetime(nanos) => return datetime::encode_datetime64(ctx, nanos),
        Leaf::Timedelta(nanos) => return datetime::encode_timedelta64(ctx, nanos),
        Leaf::Int(v) => ctx.w.long(v),
        Leaf::UInt(v) => ctx.w.ulong(v),
        Leaf::Bool(v) => ctx.w.bool(v),
        Leaf::Object(v) => return ctx.encode_value(v),
    }
    Ok(())
}
