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

//! Streaming JSON encoder for labeled tables, series and typed
//! n-dimensional arrays.
//!
//! A [`Value`] tree — scalars, containers, [`Index`]/[`Series`]/
//! [`DataFrame`] and strided [`NdArray`] buffers — encodes to a UTF-8 JSON
//! string. Tables and vectors support five orientations that rearrange
//! rows, columns and values into different JSON shapes.
//!
//! ```
//! use tabjson::{DataFrame, Encoder, Index, NdArray, Orient, Value};
//!
//! let frame = DataFrame::new(
//!     Index::new(NdArray::from_vec(vec!["x", "y"])),
//!     Index::new(NdArray::from_vec(vec![0i64, 1])),
//!     NdArray::from_shape_vec(vec![2, 2], vec![1i64, 2, 3, 4]).unwrap(),
//! )
//! .unwrap();
//!
//! let json = Encoder::new()
//!     .with_orient(Orient::Records)
//!     .encode(&Value::Frame(frame))
//!     .unwrap();
//! assert_eq!(json, r#"[{"x":1,"y":2},{"x":3,"y":4}]"#);
//! ```

pub mod array;
pub mod encode;
pub mod error;
pub mod frame;
pub mod value;
mod writer;

pub use array::{ArrayData, Dtype, NdArray, NAT};
pub use encode::{to_string, DateUnit, DefaultHandler, Encoder, Orient, MAX_DOUBLE_PRECISION};
pub use error::{Error, Result};
pub use frame::{DataFrame, Index, Series};
pub use value::{ObjectLike, Value};
