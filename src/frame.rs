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

//! Labeled one- and two-dimensional containers.

use snafu::ensure;

use crate::array::{ArrayData, Leaf, NdArray};
use crate::error::{NotTabularSnafu, Result};
use crate::value::Value;

/// An ordered sequence of labels, optionally named.
#[derive(Debug, Clone)]
pub struct Index {
    name: Option<String>,
    values: NdArray,
}

impl Index {
    pub fn new(values: NdArray) -> Self {
        Self { name: None, values }
    }

    pub fn named(name: impl Into<String>, values: NdArray) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    /// Default integer index `0..n`.
    pub fn range(n: usize) -> Self {
        Self::new(NdArray::from_vec((0..n as i64).collect::<Vec<_>>()))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn values(&self) -> &NdArray {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The label at `at` as a string, when it is one.
    pub(crate) fn label_str(&self, at: usize) -> Option<String> {
        if self.values.ndim() != 1 || at >= self.values.len() {
            return None;
        }
        if let ArrayData::Object(_) = self.values.data() {
            let offset =
                (self.values.offset() as isize + self.values.strides()[0] * at as isize) as usize;
            if let Leaf::Object(Value::Str(s)) = self.values.data().get(offset) {
                return Some(s.clone());
            }
        }
        None
    }
}

/// A labeled one-dimensional vector of values.
#[derive(Debug, Clone)]
pub struct Series {
    name: Option<String>,
    index: Index,
    values: NdArray,
}

impl Series {
    pub fn new(index: Index, values: NdArray) -> Self {
        Self {
            name: None,
            index,
            values,
        }
    }

    /// A series over `values` with a default `0..n` integer index.
    pub fn from_values(values: NdArray) -> Self {
        let index = Index::range(values.len());
        Self::new(index, values)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &NdArray {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A two-dimensional labeled table: column labels, row labels, and a 2-D
/// values array.
#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: Index,
    index: Index,
    values: NdArray,
}

impl DataFrame {
    /// The values array must be 2-dimensional; label lengths are checked
    /// against the value shape when encoding.
    pub fn new(columns: Index, index: Index, values: NdArray) -> Result<Self> {
        ensure!(values.ndim() == 2, NotTabularSnafu { ndim: values.ndim() });
        Ok(Self {
            columns,
            index,
            values,
        })
    }

    pub fn columns(&self) -> &Index {
        &self.columns
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &NdArray {
        &self.values
    }

    pub fn num_rows(&self) -> usize {
        self.values.shape()[0]
    }

    pub fn num_columns(&self) -> usize {
        self.values.shape()[1]
    }

    /// Row `i` as a series indexed by the table's columns.
    pub fn row(&self, i: usize) -> Series {
        let mut series = Series::new(self.columns.clone(), self.values.index_axis(0, i));
        if let Some(name) = self.index.label_str(i) {
            series = series.with_name(name);
        }
        series
    }

    /// Column `j` as a series indexed by the table's index.
    pub fn column(&self, j: usize) -> Series {
        let mut series = Series::new(self.index.clone(), self.values.index_axis(1, j));
        if let Some(name) = self.columns.label_str(j) {
            series = series.with_name(name);
        }
        series
    }

    /// Rows in order, as stride views.
    pub fn iter_rows(&self) -> impl Iterator<Item = Series> + '_ {
        (0..self.num_rows()).map(|i| self.row(i))
    }

    /// Columns in order, as stride views.
    pub fn iter_columns(&self) -> impl Iterator<Item = Series> + '_ {
        (0..self.num_columns()).map(|j| self.column(j))
    }
}
