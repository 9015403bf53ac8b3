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

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use pretty_assertions::assert_eq;

use tabjson::{
    to_string, DataFrame, DateUnit, Encoder, Index, NdArray, ObjectLike, Orient, Series, Value,
    NAT,
};

fn two_by_two() -> DataFrame {
    DataFrame::new(
        Index::new(NdArray::from_vec(vec!["x", "y"])),
        Index::new(NdArray::from_vec(vec![0i64, 1])),
        NdArray::from_shape_vec(vec![2, 2], vec![1i64, 2, 3, 4]).unwrap(),
    )
    .unwrap()
}

fn encode_with(orient: Orient, value: &Value) -> String {
    Encoder::new().with_orient(orient).encode(value).unwrap()
}

#[test]
fn test_scalar_literals() {
    assert_eq!(to_string(&Value::Null).unwrap(), "null");
    assert_eq!(to_string(&Value::Bool(true)).unwrap(), "true");
    assert_eq!(to_string(&Value::Int(-42)).unwrap(), "-42");
    assert_eq!(to_string(&Value::UInt(u64::MAX)).unwrap(), "18446744073709551615");
    assert_eq!(to_string(&Value::Float(1.5)).unwrap(), "1.5");
    assert_eq!(to_string(&Value::Float(f64::NAN)).unwrap(), "null");
    assert_eq!(to_string(&Value::Float(f64::INFINITY)).unwrap(), "null");
    assert_eq!(to_string(&Value::Str("hi".into())).unwrap(), "\"hi\"");
}

#[test]
fn test_simple_map() {
    let map = Value::Map(vec![
        (Value::from("a"), Value::Int(1)),
        (Value::from("b"), Value::Null),
    ]);
    assert_eq!(to_string(&map).unwrap(), r#"{"a":1,"b":null}"#);
}

#[test]
fn test_map_keys_are_coerced() {
    let map = Value::Map(vec![
        (Value::Int(3), Value::from("i")),
        (Value::Bool(false), Value::from("b")),
        (Value::Float(2.5), Value::from("f")),
    ]);
    assert_eq!(
        to_string(&map).unwrap(),
        r#"{"3":"i","false":"b","2.5":"f"}"#
    );
}

#[test]
fn test_sequences_and_sets() {
    let list = Value::List(vec![Value::Int(1), Value::from("a"), Value::Null]);
    assert_eq!(to_string(&list).unwrap(), r#"[1,"a",null]"#);

    let tuple = Value::Tuple(vec![Value::Bool(true), Value::Float(0.5)]);
    assert_eq!(to_string(&tuple).unwrap(), "[true,0.5]");

    let set = Value::Set(vec![Value::Int(9)]);
    assert_eq!(to_string(&set).unwrap(), "[9]");

    let empty = Value::List(Vec::new());
    assert_eq!(to_string(&empty).unwrap(), "[]");
}

#[test]
fn test_frame_orient_columns() {
    let json = encode_with(Orient::Columns, &Value::Frame(two_by_two()));
    assert_eq!(json, r#"{"x":{"0":1,"1":3},"y":{"0":2,"1":4}}"#);
}

#[test]
fn test_frame_orient_records() {
    let json = encode_with(Orient::Records, &Value::Frame(two_by_two()));
    assert_eq!(json, r#"[{"x":1,"y":2},{"x":3,"y":4}]"#);
}

#[test]
fn test_frame_orient_index() {
    let json = encode_with(Orient::Index, &Value::Frame(two_by_two()));
    assert_eq!(json, r#"{"0":{"x":1,"y":2},"1":{"x":3,"y":4}}"#);
}

#[test]
fn test_frame_orient_split() {
    let json = encode_with(Orient::Split, &Value::Frame(two_by_two()));
    assert_eq!(
        json,
        r#"{"columns":["x","y"],"index":[0,1],"data":[[1,2],[3,4]]}"#
    );
}

#[test]
fn test_frame_orient_values() {
    let json = encode_with(Orient::Values, &Value::Frame(two_by_two()));
    assert_eq!(json, "[[1,2],[3,4]]");
}

#[test]
fn test_empty_frame() {
    let frame = DataFrame::new(
        Index::new(NdArray::from_vec(Vec::<i64>::new())),
        Index::new(NdArray::from_vec(Vec::<i64>::new())),
        NdArray::from_shape_vec(vec![0, 0], Vec::<i64>::new()).unwrap(),
    )
    .unwrap();
    assert_eq!(encode_with(Orient::Columns, &Value::Frame(frame.clone())), "{}");
    assert_eq!(encode_with(Orient::Records, &Value::Frame(frame.clone())), "[]");
    assert_eq!(
        encode_with(Orient::Split, &Value::Frame(frame)),
        r#"{"columns":[],"index":[],"data":[]}"#
    );
}

#[test]
fn test_frame_label_shape_mismatch() {
    let frame = DataFrame::new(
        Index::new(NdArray::from_vec(vec!["x", "y", "z"])),
        Index::new(NdArray::from_vec(vec![0i64, 1])),
        NdArray::from_shape_vec(vec![2, 2], vec![1i64, 2, 3, 4]).unwrap(),
    )
    .unwrap();
    let err = to_string(&Value::Frame(frame)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Label array sizes do not match corresponding data shape"
    );
}

#[test]
fn test_series_orient_split_with_nan() {
    let series = Series::new(
        Index::new(NdArray::from_vec(vec!["a", "b"])),
        NdArray::from_vec(vec![1.0f64, f64::NAN]),
    )
    .with_name("v");
    let json = encode_with(Orient::Split, &Value::Series(series));
    assert_eq!(json, r#"{"name":"v","index":["a","b"],"data":[1.0,null]}"#);
}

#[test]
fn test_series_orient_index_and_values() {
    let series = Series::from_values(NdArray::from_vec(vec![10i64, 20]));
    assert_eq!(
        encode_with(Orient::Index, &Value::Series(series.clone())),
        r#"{"0":10,"1":20}"#
    );
    assert_eq!(
        encode_with(Orient::Columns, &Value::Series(series.clone())),
        r#"{"0":10,"1":20}"#
    );
    assert_eq!(encode_with(Orient::Records, &Value::Series(series.clone())), "[10,20]");
    assert_eq!(encode_with(Orient::Values, &Value::Series(series)), "[10,20]");
}

#[test]
fn test_unnamed_series_split_has_null_name() {
    let series = Series::from_values(NdArray::from_vec(vec![1i64]));
    assert_eq!(
        encode_with(Orient::Split, &Value::Series(series)),
        r#"{"name":null,"index":[0],"data":[1]}"#
    );
}

#[test]
fn test_index_orient_split_and_default() {
    let index = Index::named("rows", NdArray::from_vec(vec![0i64, 1]));
    assert_eq!(
        encode_with(Orient::Split, &Value::Index(index.clone())),
        r#"{"name":"rows","data":[0,1]}"#
    );
    assert_eq!(to_string(&Value::Index(index)).unwrap(), "[0,1]");
}

#[test]
fn test_ndarray_nested() {
    let array = NdArray::from_shape_vec(vec![2, 2, 2], (0..8).collect::<Vec<i64>>()).unwrap();
    assert_eq!(
        to_string(&Value::Array(array)).unwrap(),
        "[[[0,1],[2,3]],[[4,5],[6,7]]]"
    );
}

#[test]
fn test_ndarray_transposed_view() {
    let array = NdArray::from_shape_vec(vec![2, 3], (0..6).collect::<Vec<i64>>()).unwrap();
    assert_eq!(to_string(&Value::Array(array.t())).unwrap(), "[[0,3],[1,4],[2,5]]");
}

#[test]
fn test_object_dtype_array_recurses() {
    let array = NdArray::from_vec(vec![
        Value::Int(1),
        Value::from("s"),
        Value::Float(f64::NAN),
        Value::List(vec![Value::Bool(true)]),
    ]);
    assert_eq!(to_string(&Value::Array(array)).unwrap(), r#"[1,"s",null,[true]]"#);
}

#[test]
fn test_datetime_scalar_epoch_and_iso() {
    let dt = NaiveDate::from_ymd_opt(1970, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let epoch = Encoder::new()
        .with_date_unit(DateUnit::Seconds)
        .encode(&Value::DateTime(dt))
        .unwrap();
    assert_eq!(epoch, "86400");

    let iso = Encoder::new()
        .with_iso_dates(true)
        .encode(&Value::DateTime(dt))
        .unwrap();
    assert_eq!(iso, "\"1970-01-02T00:00:00.000\"");
}

#[test]
fn test_date_scalar_is_midnight() {
    let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
    let json = Encoder::new()
        .with_date_unit(DateUnit::Seconds)
        .encode(&Value::Date(date))
        .unwrap();
    assert_eq!(json, "86400");
}

#[test]
fn test_datetime_array_nat_is_null_in_both_modes() {
    let array = NdArray::datetime(vec![0, NAT, 86_400_000_000_000]);

    let epoch = Encoder::new()
        .with_date_unit(DateUnit::Milliseconds)
        .encode(&Value::Array(array.clone()))
        .unwrap();
    assert_eq!(epoch, "[0,null,86400000]");

    let iso = Encoder::new()
        .with_iso_dates(true)
        .encode(&Value::Array(array))
        .unwrap();
    assert_eq!(
        iso,
        r#"["1970-01-01T00:00:00.000",null,"1970-01-02T00:00:00.000"]"#
    );
}

#[test]
fn test_timedelta_rescales_to_date_unit() {
    let delta = TimeDelta::milliseconds(1500);
    let json = Encoder::new()
        .with_date_unit(DateUnit::Seconds)
        .encode(&Value::Timedelta(delta))
        .unwrap();
    assert_eq!(json, "1");

    let array = NdArray::timedelta(vec![1_500_000_000, NAT]);
    let json = Encoder::new()
        .with_date_unit(DateUnit::Milliseconds)
        .encode(&Value::Array(array))
        .unwrap();
    assert_eq!(json, "[1500,null]");
}

#[test]
fn test_datetime_index_labels() {
    let series = Series::new(
        Index::new(NdArray::datetime(vec![0, 86_400_000_000_000])),
        NdArray::from_vec(vec![1i64, 2]),
    );
    let json = Encoder::new()
        .with_orient(Orient::Index)
        .with_date_unit(DateUnit::Seconds)
        .encode(&Value::Series(series))
        .unwrap();
    assert_eq!(json, r#"{"0":1,"86400":2}"#);
}

#[test]
fn test_ensure_ascii_default_and_disabled() {
    let value = Value::from("caf\u{e9}");
    assert_eq!(to_string(&value).unwrap(), "\"caf\\u00e9\"");

    let raw = Encoder::new()
        .with_ensure_ascii(false)
        .encode(&value)
        .unwrap();
    assert_eq!(raw, "\"caf\u{e9}\"");
}

#[test]
fn test_escape_html_characters() {
    let json = Encoder::new()
        .with_escape_html(true)
        .encode(&Value::from("<b>&"))
        .unwrap();
    assert_eq!(json, "\"\\u003cb\\u003e\\u0026\"");
}

#[test]
fn test_double_precision_controls_digits() {
    let third = Value::Float(1.0 / 3.0);
    let json = Encoder::new()
        .with_double_precision(3)
        .encode(&third)
        .unwrap();
    assert_eq!(json, "0.333");
}

#[test]
fn test_bytes_must_be_utf8() {
    let ok = Value::Bytes(bytes::Bytes::from_static(b"abc"));
    assert_eq!(to_string(&ok).unwrap(), "\"abc\"");

    let bad = Value::Bytes(bytes::Bytes::from_static(&[0xff, 0xfe]));
    let err = to_string(&bad).unwrap_err();
    assert!(err.to_string().starts_with("Invalid UTF-8 in byte string"));
}

#[test]
fn test_datetime_epoch_overflow_is_an_error() {
    // outside the signed 64-bit nanosecond range
    let dt = NaiveDate::from_ymd_opt(3000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = to_string(&Value::DateTime(dt)).unwrap_err();
    assert_eq!(err.to_string(), "Datetime value out of representable range");
}

#[test]
fn test_duration_overflow_is_an_error() {
    let err = to_string(&Value::Timedelta(TimeDelta::days(150_000))).unwrap_err();
    assert_eq!(err.to_string(), "Duration value out of representable range");
}

#[test]
fn test_iso_dates_reject_five_digit_years() {
    let dt = NaiveDate::from_ymd_opt(10_000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = Encoder::new()
        .with_iso_dates(true)
        .encode(&Value::DateTime(dt))
        .unwrap_err();
    assert_eq!(err.to_string(), "Could not convert datetime value to string");
}

#[test]
fn test_non_scalar_map_keys_are_rejected() {
    let map = Value::Map(vec![(Value::List(vec![Value::Int(1)]), Value::Int(1))]);
    let err = to_string(&map).unwrap_err();
    assert_eq!(
        err.to_string(),
        "A non-scalar object key is not JSON serializable"
    );
}

#[test]
fn test_non_finite_float_keys_are_rejected() {
    let map = Value::Map(vec![(Value::Float(f64::NAN), Value::Int(1))]);
    let err = to_string(&map).unwrap_err();
    assert_eq!(
        err.to_string(),
        "A non-finite float object key is not JSON serializable"
    );

    let series = Series::new(
        Index::new(NdArray::from_vec(vec![f64::INFINITY, 1.0])),
        NdArray::from_vec(vec![1i64, 2]),
    );
    let err = Encoder::new()
        .with_orient(Orient::Index)
        .encode(&Value::Series(series))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A non-finite float object key is not JSON serializable"
    );
}

#[test]
fn test_non_scalar_series_labels_are_rejected() {
    let series = Series::new(
        Index::new(NdArray::from_vec(vec![
            Value::List(vec![Value::Int(0)]),
            Value::Int(1),
        ])),
        NdArray::from_vec(vec![1i64, 2]),
    );
    let err = Encoder::new()
        .with_orient(Orient::Columns)
        .encode(&Value::Series(series))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A non-scalar object key is not JSON serializable"
    );
}

#[test]
fn test_recursion_limit() {
    let mut value = Value::Int(1);
    for _ in 0..2000 {
        value = Value::List(vec![value]);
    }
    let err = to_string(&value).unwrap_err();
    assert_eq!(err.to_string(), "Maximum recursion level reached");
}

#[derive(Debug)]
struct Point {
    x: i64,
    y: i64,
}

impl ObjectLike for Point {
    fn attributes(&self) -> Vec<(String, Value)> {
        vec![
            ("x".to_owned(), Value::Int(self.x)),
            ("y".to_owned(), Value::Int(self.y)),
            ("_hidden".to_owned(), Value::Int(0)),
        ]
    }
}

#[derive(Debug)]
struct AsMapping;

impl ObjectLike for AsMapping {
    fn to_mapping(&self) -> Option<Vec<(Value, Value)>> {
        Some(vec![(Value::from("kind"), Value::from("mapping"))])
    }
}

#[derive(Debug)]
struct Opaque;

impl ObjectLike for Opaque {}

#[test]
fn test_attribute_object_skips_underscored_names() {
    let value = Value::Object(Arc::new(Point { x: 1, y: 2 }));
    assert_eq!(to_string(&value).unwrap(), r#"{"x":1,"y":2}"#);
}

#[test]
fn test_to_mapping_takes_precedence() {
    let value = Value::Object(Arc::new(AsMapping));
    assert_eq!(to_string(&value).unwrap(), r#"{"kind":"mapping"}"#);
}

#[test]
fn test_default_handler_replaces_opaque_values() {
    let value = Value::Object(Arc::new(Opaque));
    let json = Encoder::new()
        .with_default_handler(Arc::new(|_: &Value| Ok(Value::from("handled"))))
        .encode(&value)
        .unwrap();
    assert_eq!(json, "\"handled\"");
}

#[test]
fn test_default_handler_error_is_surfaced() {
    let value = Value::Object(Arc::new(Opaque));
    let err = Encoder::new()
        .with_default_handler(Arc::new(|_: &Value| Err("nope".to_owned())))
        .encode(&value)
        .unwrap_err();
    assert_eq!(err.to_string(), "Default handler failed: nope");
}

#[test]
fn test_orient_and_date_unit_parse() {
    assert_eq!("split".parse::<Orient>().unwrap(), Orient::Split);
    assert!("sideways".parse::<Orient>().is_err());
    assert_eq!("us".parse::<DateUnit>().unwrap(), DateUnit::Microseconds);
    assert!("days".parse::<DateUnit>().is_err());
}
