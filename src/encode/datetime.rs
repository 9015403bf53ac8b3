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

//! Date/time rendering: epoch integers at the configured unit, or fixed
//! width ISO-8601 strings.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use snafu::{ensure, OptionExt};

use super::{Ctx, DateUnit};
use crate::array::NAT;
use crate::error::{DatetimeToStringSnafu, OverflowSnafu, Result};

const NANOS_PER_SEC: i64 = 1_000_000_000;

fn iso_format_str(unit: DateUnit) -> &'static str {
    match unit {
        DateUnit::Seconds => "%Y-%m-%dT%H:%M:%S",
        DateUnit::Milliseconds => "%Y-%m-%dT%H:%M:%S%.3f",
        DateUnit::Microseconds => "%Y-%m-%dT%H:%M:%S%.6f",
        DateUnit::Nanoseconds => "%Y-%m-%dT%H:%M:%S%.9f",
    }
}

fn datetime_to_nanos(dt: &NaiveDateTime) -> Result<i64> {
    dt.and_utc()
        .timestamp_nanos_opt()
        .context(OverflowSnafu { what: "Datetime" })
}

fn nanos_to_datetime(nanos: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(
        nanos.div_euclid(NANOS_PER_SEC),
        nanos.rem_euclid(NANOS_PER_SEC) as u32,
    )
    .map(|dt| dt.naive_utc())
    .context(DatetimeToStringSnafu)
}

pub(crate) fn iso_text(unit: DateUnit, dt: &NaiveDateTime) -> Result<String> {
    // The fixed-width form has no representation for years outside
    // 0000..=9999.
    ensure!((0..=9999).contains(&dt.year()), DatetimeToStringSnafu);
    let mut text = String::new();
    write!(text, "{}", dt.format(iso_format_str(unit)))
        .ok()
        .context(DatetimeToStringSnafu)?;
    Ok(text)
}

pub(crate) fn encode_datetime(ctx: &mut Ctx<'_>, dt: &NaiveDateTime) -> Result<()> {
    if ctx.iso_dates {
        let text = iso_text(ctx.date_unit, dt)?;
        ctx.w.string(&text);
    } else {
        let nanos = datetime_to_nanos(dt)?;
        ctx.w.long(ctx.date_unit.scale_nanos(nanos));
    }
    Ok(())
}

/// Dates encode as midnight of that day.
pub(crate) fn encode_date(ctx: &mut Ctx<'_>, date: &NaiveDate) -> Result<()> {
    encode_datetime(ctx, &date.and_time(NaiveTime::MIN))
}

/// Time-of-day renders via its own ISO formatting under both date modes.
pub(crate) fn encode_time(ctx: &mut Ctx<'_>, time: &NaiveTime) -> Result<()> {
    let mut text = String::new();
    write!(text, "{}", time.format("%H:%M:%S%.f"))
        .ok()
        .context(DatetimeToStringSnafu)?;
    ctx.w.string(&text);
    Ok(())
}

/// Durations emit as integers at the configured unit under both date modes.
pub(crate) fn encode_timedelta(ctx: &mut Ctx<'_>, delta: &TimeDelta) -> Result<()> {
    let nanos = delta
        .num_nanoseconds()
        .context(OverflowSnafu { what: "Duration" })?;
    ctx.w.long(ctx.date_unit.scale_nanos(nanos));
    Ok(())
}

/// Array leaf: i64 nanoseconds since the epoch, [`NAT`] for missing.
pub(crate) fn encode_datetime64(ctx: &mut Ctx<'_>, nanos: i64) -> Result<()> {
    if nanos == NAT {
        ctx.w.null();
        return Ok(());
    }
    if ctx.iso_dates {
        let text = iso_text(ctx.date_unit, &nanos_to_datetime(nanos)?)?;
        ctx.w.string(&text);
    } else {
        ctx.w.long(ctx.date_unit.scale_nanos(nanos));
    }
    Ok(())
}

/// Array leaf: i64 nanoseconds of duration, [`NAT`] for missing.
pub(crate) fn encode_timedelta64(ctx: &mut Ctx<'_>, nanos: i64) -> Result<()> {
    if nanos == NAT {
        ctx.w.null();
    } else {
        ctx.w.long(ctx.date_unit.scale_nanos(nanos));
    }
    Ok(())
}

/// Key text for a datetime array label, honoring the date options.
pub(crate) fn datetime64_key(ctx: &Ctx<'_>, nanos: i64) -> Result<String> {
    if nanos == NAT {
        return Ok("null".to_owned());
    }
    if ctx.iso_dates {
        iso_text(ctx.date_unit, &nanos_to_datetime(nanos)?)
    } else {
        let mut scratch = itoa::Buffer::new();
        Ok(scratch.format(ctx.date_unit.scale_nanos(nanos)).to_owned())
    }
}

/// Key text for a datetime scalar label.
pub(crate) fn datetime_key(ctx: &Ctx<'_>, dt: &NaiveDateTime) -> Result<String> {
    if ctx.iso_dates {
        iso_text(ctx.date_unit, dt)
    } else {
        let nanos = datetime_to_nanos(dt)?;
        let mut scratch = itoa::Buffer::new();
        Ok(scratch.format(ctx.date_unit.scale_nanos(nanos)).to_owned())
    }
}
