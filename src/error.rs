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

use snafu::prelude::*;
use snafu::Location;

use crate::array::Dtype;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Invalid value '{}' for option '{}'", value, option))]
    InvalidOption {
        option: &'static str,
        value: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid value '{}' for option 'double_precision', max is '15'", value))]
    InvalidPrecision {
        value: u8,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Unhandled dtype {}", dtype))]
    UnhandledDtype {
        dtype: Dtype,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{} is not JSON serializable", kind))]
    Unsupported {
        kind: &'static str,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Cannot encode a 0-dimensional array"))]
    ZeroDimensional {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Maximum recursion level reached"))]
    RecursionLimit {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{} value out of representable range", what))]
    Overflow {
        what: &'static str,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Could not convert datetime value to string"))]
    DatetimeToString {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid UTF-8 in byte string: {}", source))]
    InvalidUtf8 {
        source: std::str::Utf8Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Label array sizes do not match corresponding data shape"))]
    MismatchedLabels {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Data of length {} does not fit shape {:?}", len, shape))]
    MismatchedShape {
        len: usize,
        shape: Vec<usize>,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Table values must be 2-dimensional, got {} dimension(s)", ndim))]
    NotTabular {
        ndim: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Default handler failed: {}", msg))]
    Handler {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
