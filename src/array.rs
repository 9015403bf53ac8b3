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

//! Typed n-dimensional arrays backed by contiguous buffers.
//!
//! An [`NdArray`] is a view (offset + shape + element strides) over a shared
//! [`ArrayData`] buffer, so slicing a row or a column out of a 2-D array
//! never copies the underlying values.

use std::fmt::Display;
use std::sync::Arc;

use crate::error::{MismatchedShapeSnafu, Result};
use crate::value::Value;
use snafu::ensure;

/// Sentinel stored in datetime/timedelta buffers for a missing value.
///
/// Encodes as JSON `null` under every date mode.
pub const NAT: i64 = i64::MIN;

/// Element type of an [`NdArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// i64 nanoseconds since the UNIX epoch, [`NAT`] for missing.
    Datetime,
    /// i64 nanoseconds of signed duration, [`NAT`] for missing.
    Timedelta,
    /// Arbitrary [`Value`] elements.
    Object,
}

impl Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dtype::Bool => "bool",
            Dtype::Int8 => "int8",
            Dtype::Int16 => "int16",
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::UInt8 => "uint8",
            Dtype::UInt16 => "uint16",
            Dtype::UInt32 => "uint32",
            Dtype::UInt64 => "uint64",
            Dtype::Float32 => "float32",
            Dtype::Float64 => "float64",
            Dtype::Datetime => "datetime64[ns]",
            Dtype::Timedelta => "timedelta64[ns]",
            Dtype::Object => "object",
        };
        write!(f, "{name}")
    }
}

/// Owned contiguous storage, one variant per dtype.
#[derive(Debug)]
pub enum ArrayData {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Datetime(Vec<i64>),
    Timedelta(Vec<i64>),
    Object(Vec<Value>),
}

/// A single element materialised out of a buffer by the per-dtype getter.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Leaf<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Datetime(i64),
    Timedelta(i64),
    Object(&'a Value),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Bool(v) => v.len(),
            ArrayData::Int8(v) => v.len(),
            ArrayData::Int16(v) => v.len(),
            ArrayData::Int32(v) => v.len(),
            ArrayData::Int64(v) => v.len(),
            ArrayData::UInt8(v) => v.len(),
            ArrayData::UInt16(v) => v.len(),
            ArrayData::UInt32(v) => v.len(),
            ArrayData::UInt64(v) => v.len(),
            ArrayData::Float32(v) => v.len(),
            ArrayData::Float64(v) => v.len(),
            ArrayData::Datetime(v) => v.len(),
            ArrayData::Timedelta(v) => v.len(),
            ArrayData::Object(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            ArrayData::Bool(_) => Dtype::Bool,
            ArrayData::Int8(_) => Dtype::Int8,
            ArrayData::Int16(_) => Dtype::Int16,
            ArrayData::Int32(_) => Dtype::Int32,
            ArrayData::Int64(_) => Dtype::Int64,
            ArrayData::UInt8(_) => Dtype::UInt8,
            ArrayData::UInt16(_) => Dtype::UInt16,
            ArrayData::UInt32(_) => Dtype::UInt32,
            ArrayData::UInt64(_) => Dtype::UInt64,
            ArrayData::Float32(_) => Dtype::Float32,
            ArrayData::Float64(_) => Dtype::Float64,
            ArrayData::Datetime(_) => Dtype::Datetime,
            ArrayData::Timedelta(_) => Dtype::Timedelta,
            ArrayData::Object(_) => Dtype::Object,
        }
    }

    /// Materialise the element at `index` into the buffer.
    pub(crate) fn get(&self, index: usize) -> Leaf<'_> {
        match self {
            ArrayData::Bool(v) => Leaf::Bool(v[index]),
            ArrayData::Int8(v) => Leaf::Int(v[index] as i64),
            ArrayData::Int16(v) => Leaf::Int(v[index] as i64),
            ArrayData::Int32(v) => Leaf::Int(v[index] as i64),
            ArrayData::Int64(v) => Leaf::Int(v[index]),
            ArrayData::UInt8(v) => Leaf::UInt(v[index] as u64),
            ArrayData::UInt16(v) => Leaf::UInt(v[index] as u64),
            ArrayData::UInt32(v) => Leaf::UInt(v[index] as u64),
            ArrayData::UInt64(v) => Leaf::UInt(v[index]),
            ArrayData::Float32(v) => Leaf::Float(v[index] as f64),
            ArrayData::Float64(v) => Leaf::Float(v[index]),
            ArrayData::Datetime(v) => Leaf::Datetime(v[index]),
            ArrayData::Timedelta(v) => Leaf::Timedelta(v[index]),
            ArrayData::Object(v) => Leaf::Object(&v[index]),
        }
    }
}

macro_rules! impl_from_vec {
    ($($native:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<Vec<$native>> for ArrayData {
                fn from(values: Vec<$native>) -> Self {
                    ArrayData::$variant(values)
                }
            }
        )+
    };
}

impl_from_vec!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    Value => Object,
);

impl From<Vec<String>> for ArrayData {
    fn from(values: Vec<String>) -> Self {
        ArrayData::Object(values.into_iter().map(Value::Str).collect())
    }
}

impl From<Vec<&str>> for ArrayData {
    fn from(values: Vec<&str>) -> Self {
        ArrayData::Object(values.iter().map(|s| Value::Str((*s).to_owned())).collect())
    }
}

/// A strided view over shared [`ArrayData`].
///
/// Freshly constructed arrays are row-major; [`NdArray::t`] and
/// [`NdArray::index_axis`] derive further views without copying.
#[derive(Debug, Clone)]
pub struct NdArray {
    data: Arc<ArrayData>,
    offset: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
}

fn row_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1] as isize;
    }
    strides
}

impl NdArray {
    /// A 1-D array over the whole buffer.
    pub fn from_vec(data: impl Into<ArrayData>) -> Self {
        let data = data.into();
        let len = data.len();
        Self {
            data: Arc::new(data),
            offset: 0,
            shape: vec![len],
            strides: vec![1],
        }
    }

    /// A row-major array of the given shape; the buffer length must equal
    /// the product of the axis sizes.
    pub fn from_shape_vec(shape: impl Into<Vec<usize>>, data: impl Into<ArrayData>) -> Result<Self> {
        let shape = shape.into();
        let data = data.into();
        let size: usize = shape.iter().product();
        ensure!(
            data.len() == size,
            MismatchedShapeSnafu {
                len: data.len(),
                shape: shape.clone(),
            }
        );
        let strides = row_major_strides(&shape);
        Ok(Self {
            data: Arc::new(data),
            offset: 0,
            shape,
            strides,
        })
    }

    /// A 1-D datetime array of i64 nanoseconds since the epoch ([`NAT`] for
    /// missing values).
    pub fn datetime(nanos: Vec<i64>) -> Self {
        Self::from_vec(ArrayData::Datetime(nanos))
    }

    /// A 1-D timedelta array of i64 nanoseconds ([`NAT`] for missing values).
    pub fn timedelta(nanos: Vec<i64>) -> Self {
        Self::from_vec(ArrayData::Timedelta(nanos))
    }

    pub fn dtype(&self) -> Dtype {
        self.data.dtype()
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Length along axis 0 (0 for a 0-dimensional array).
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Transposed view: axes reversed, same buffer.
    pub fn t(&self) -> NdArray {
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.reverse();
        strides.reverse();
        NdArray {
            data: Arc::clone(&self.data),
            offset: self.offset,
            shape,
            strides,
        }
    }

    /// Sub-view with `axis` fixed at position `at`; drops that axis.
    pub fn index_axis(&self, axis: usize, at: usize) -> NdArray {
        debug_assert!(axis < self.ndim() && at < self.shape[axis]);
        let offset = (self.offset as isize + self.strides[axis] * at as isize) as usize;
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.remove(axis);
        strides.remove(axis);
        NdArray {
            data: Arc::clone(&self.data),
            offset,
            shape,
            strides,
        }
    }

    pub(crate) fn data(&self) -> &ArrayData {
        &self.data
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn strides(&self) -> &[isize] {
        &self.strides
    }
}
