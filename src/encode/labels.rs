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

//! Label pre-encoding: every row/column label of a table or vector is
//! rendered to its final key text once, so inner iterations splice bytes
//! instead of re-encoding labels per element.
//!
//! Cached text is escaped but unquoted; the writer adds the quotes and
//! colon when splicing a key.

use chrono::NaiveTime;
use snafu::{ensure, OptionExt, ResultExt};

use super::strider::Strider;
use super::{datetime, scalar, Ctx};
use crate::array::{Dtype, Leaf, NdArray};
use crate::error::{
    DatetimeToStringSnafu, InvalidUtf8Snafu, MismatchedLabelsSnafu, Result, UnhandledDtypeSnafu,
    UnsupportedSnafu,
};
use crate::value::Value;
use crate::writer::{escape_str, format_double};

/// Pre-encode a 1-D label array of exactly `expected` entries.
pub(crate) fn encode_labels(
    ctx: &mut Ctx<'_>,
    labels: &NdArray,
    expected: usize,
) -> Result<Vec<String>> {
    ensure!(labels.ndim() == 1, MismatchedLabelsSnafu);
    ensure!(labels.len() == expected, MismatchedLabelsSnafu);
    let mut out = Vec::with_capacity(expected);
    let mut strider = Strider::new(labels, false)?;
    while let Some(leaf) = strider.next_leaf() {
        out.push(key_for_leaf(ctx, leaf)?);
    }
    Ok(out)
}

fn key_for_leaf(ctx: &mut Ctx<'_>, leaf: Leaf<'_>) -> Result<String> {
    match leaf {
        Leaf::Bool(v) => Ok(bool_text(v)),
        Leaf::Int(v) => Ok(int_text(v)),
        Leaf::UInt(v) => Ok(uint_text(v)),
        Leaf::Float(v) => float_text(ctx, v),
        Leaf::Datetime(nanos) => datetime::datetime64_key(ctx, nanos),
        Leaf::Timedelta(_) => UnhandledDtypeSnafu {
            dtype: Dtype::Timedelta,
        }
        .fail(),
        Leaf::Object(value) => key_for_value(ctx, value),
    }
}

/// Key text for a scalar value, used for object-dtype labels and for
/// mapping keys.
pub(crate) fn key_for_value(ctx: &mut Ctx<'_>, value: &Value) -> Result<String> {
    match value {
        Value::Str(s) => Ok(escaped_text(ctx, s)),
        Value::Bytes(b) => {
            let s = std::str::from_utf8(b).context(InvalidUtf8Snafu)?;
            Ok(escaped_text(ctx, s))
        }
        Value::Null => Ok("null".to_owned()),
        Value::Bool(v) => Ok(bool_text(*v)),
        Value::Int(v) => Ok(int_text(*v)),
        Value::UInt(v) => Ok(uint_text(*v)),
        Value::Float(v) => float_text(ctx, *v),
        Value::Decimal(v) => float_text(ctx, scalar::decimal_to_double(v)),
        Value::DateTime(dt) => datetime::datetime_key(ctx, dt),
        Value::Date(d) => datetime::datetime_key(ctx, &d.and_time(NaiveTime::MIN)),
        Value::Time(t) => {
            use std::fmt::Write as _;
            let mut text = String::new();
            write!(text, "{}", t.format("%H:%M:%S%.f"))
                .ok()
                .context(DatetimeToStringSnafu)?;
            Ok(text)
        }
        _ => UnsupportedSnafu {
            kind: "A non-scalar object key",
        }
        .fail(),
    }
}

fn escaped_text(ctx: &Ctx<'_>, s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_str(&mut out, s, ctx.w.ensure_ascii(), ctx.w.escape_html());
    out
}

fn bool_text(v: bool) -> String {
    (if v { "true" } else { "false" }).to_owned()
}

fn int_text(v: i64) -> String {
    let mut scratch = itoa::Buffer::new();
    scratch.format(v).to_owned()
}

fn uint_text(v: u64) -> String {
    let mut scratch = itoa::Buffer::new();
    scratch.format(v).to_owned()
}

/// Object keys must be finite; nan/inf have no key text.
fn float_text(ctx: &Ctx<'_>, v: f64) -> Result<String> {
    ensure!(
        v.is_finite(),
        UnsupportedSnafu {
            kind: "A non-finite float object key",
        }
    );
    Ok(format_double(v, ctx.w.double_precision()))
}
