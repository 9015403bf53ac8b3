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

//! The numeric-array strider: walks a k-dimensional typed buffer one axis
//! at a time by updating an index vector and advancing an element offset by
//! stride.
//!
//! A nested axis is encoded by recursing with the same strider (descend,
//! encode, ascend), so the walker state is handed through instead of
//! allocating a fresh walker per child.

use super::{encode_leaf, Ctx};
use crate::array::{ArrayData, Leaf, NdArray};
use crate::error::{Result, ZeroDimensionalSnafu};
use snafu::ensure;

/// Walker state over one array view.
///
/// Invariant: `offset = base + Σ strides[d] · index[d]`, with
/// `index[d] ∈ [0, shape[d]]` for every axis `d` at or above the current
/// depth.
#[derive(Debug)]
pub(crate) struct Strider<'a> {
    data: &'a ArrayData,
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: isize,
    index: Vec<usize>,
    depth: usize,
}

impl<'a> Strider<'a> {
    /// `transpose` reverses the axis order, walking the buffer as its
    /// logical transpose.
    pub fn new(array: &'a NdArray, transpose: bool) -> Result<Self> {
        ensure!(array.ndim() > 0, ZeroDimensionalSnafu);
        let mut shape = array.shape().to_vec();
        let mut strides = array.strides().to_vec();
        if transpose {
            shape.reverse();
            strides.reverse();
        }
        let ndim = shape.len();
        Ok(Self {
            data: array.data(),
            shape,
            strides,
            offset: array.offset() as isize,
            index: vec![0; ndim],
            depth: 0,
        })
    }

    fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn at_leaf(&self) -> bool {
        self.depth == self.ndim() - 1
    }

    /// Position along the current axis (the next element to visit).
    pub fn pos(&self) -> usize {
        self.index[self.depth]
    }

    /// Step into the next child of the current axis. Returns false when the
    /// axis is exhausted.
    pub fn descend(&mut self) -> bool {
        debug_assert!(!self.at_leaf());
        if self.index[self.depth] == self.shape[self.depth] {
            return false;
        }
        self.depth += 1;
        self.index[self.depth] = 0;
        true
    }

    /// Pop one level: rewind the child axis walk and advance the parent
    /// axis by one stride.
    pub fn ascend(&mut self) {
        debug_assert!(self.depth > 0);
        let child = self.depth;
        self.offset -= self.strides[child] * self.index[child] as isize;
        self.depth -= 1;
        let parent = self.depth;
        self.index[parent] += 1;
        self.offset += self.strides[parent];
    }

    /// Leaf phase: materialise the element at the current offset and
    /// advance along the leaf axis.
    pub fn next_leaf(&mut self) -> Option<Leaf<'a>> {
        debug_assert!(self.at_leaf());
        let axis = self.depth;
        if self.index[axis] == self.shape[axis] {
            return None;
        }
        let leaf = self.data.get(self.offset as usize);
        self.offset += self.strides[axis];
        self.index[axis] += 1;
        Some(leaf)
    }
}

/// Encode an array view. When `labels` is given the leaf axis emits as an
/// object keyed by that pre-encoded key text; outer axes emit as arrays.
pub(crate) fn encode_view(
    ctx: &mut Ctx<'_>,
    array: &NdArray,
    labels: Option<&[String]>,
) -> Result<()> {
    let mut strider = Strider::new(array, false)?;
    encode_axis(ctx, &mut strider, labels)
}

fn encode_axis(
    ctx: &mut Ctx<'_>,
    strider: &mut Strider<'_>,
    labels: Option<&[String]>,
) -> Result<()> {
    if strider.at_leaf() {
        match labels {
            Some(keys) => {
                ctx.w.begin_object();
                let mut first = true;
                loop {
                    let pos = strider.pos();
                    let Some(leaf) = strider.next_leaf() else {
                        break;
                    };
                    if !first {
                        ctx.w.item_sep();
                    }
                    first = false;
                    ctx.w.raw_key(&keys[pos]);
                    encode_leaf(ctx, leaf)?;
                }
                ctx.w.end_object();
            }
            None => {
                ctx.w.begin_array();
                let mut first = true;
                while let Some(leaf) = strider.next_leaf() {
                    if !first {
                        ctx.w.item_sep();
                    }
                    first = false;
                    encode_leaf(ctx, leaf)?;
                }
                ctx.w.end_array();
            }
        }
        return Ok(());
    }

    ctx.w.begin_array();
    let mut first = true;
    while strider.descend() {
        if !first {
            ctx.w.item_sep();
        }
        first = false;
        encode_axis(ctx, strider, labels)?;
        strider.ascend();
    }
    ctx.w.end_array();
    Ok(())
}
