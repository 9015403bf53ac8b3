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

//! Drivers for labeled containers and the table orientation state machine.
//!
//! A table scope rewrites the orientation its children observe (a split
//! table forces `Values` so contained vectors and arrays emit raw data; a
//! records table forces `Index` so each row emits as `{column: value}`) and
//! restores the prior orientation on exit.

use super::{labels, strider, Ctx, Orient};
use crate::error::{MismatchedLabelsSnafu, Result};
use crate::frame::{DataFrame, Index, Series};
use snafu::ensure;

pub(crate) fn encode_index(ctx: &mut Ctx<'_>, index: &Index) -> Result<()> {
    if ctx.orient == Orient::Split {
        ctx.w.begin_object();
        ctx.w.key("name");
        match index.name() {
            Some(name) => ctx.w.string(name),
            None => ctx.w.null(),
        }
        ctx.w.item_sep();
        ctx.w.key("data");
        ctx.with_orient(Orient::Values, |ctx| {
            strider::encode_view(ctx, index.values(), None)
        })?;
        ctx.w.end_object();
        Ok(())
    } else {
        strider::encode_view(ctx, index.values(), None)
    }
}

pub(crate) fn encode_series(ctx: &mut Ctx<'_>, series: &Series) -> Result<()> {
    match ctx.orient {
        Orient::Split => {
            ctx.w.begin_object();
            ctx.w.key("name");
            match series.name() {
                Some(name) => ctx.w.string(name),
                None => ctx.w.null(),
            }
            ctx.w.item_sep();
            ctx.w.key("index");
            ctx.with_orient(Orient::Values, |ctx| {
                strider::encode_view(ctx, series.index().values(), None)
            })?;
            ctx.w.item_sep();
            ctx.w.key("data");
            ctx.with_orient(Orient::Values, |ctx| {
                strider::encode_view(ctx, series.values(), None)
            })?;
            ctx.w.end_object();
            Ok(())
        }
        Orient::Index | Orient::Columns => {
            let keys = labels::encode_labels(ctx, series.index().values(), series.len())?;
            strider::encode_view(ctx, series.values(), Some(&keys))
        }
        Orient::Records | Orient::Values => strider::encode_view(ctx, series.values(), None),
    }
}

pub(crate) fn encode_frame(ctx: &mut Ctx<'_>, frame: &DataFrame) -> Result<()> {
    ensure!(
        frame.index().len() == frame.num_rows() && frame.columns().len() == frame.num_columns(),
        MismatchedLabelsSnafu
    );
    match ctx.orient {
        Orient::Split => {
            ctx.w.begin_object();
            ctx.w.key("columns");
            ctx.with_orient(Orient::Values, |ctx| {
                strider::encode_view(ctx, frame.columns().values(), None)
            })?;
            ctx.w.item_sep();
            ctx.w.key("index");
            ctx.with_orient(Orient::Values, |ctx| {
                strider::encode_view(ctx, frame.index().values(), None)
            })?;
            ctx.w.item_sep();
            ctx.w.key("data");
            ctx.with_orient(Orient::Values, |ctx| {
                strider::encode_view(ctx, frame.values(), None)
            })?;
            ctx.w.end_object();
            Ok(())
        }
        Orient::Records => {
            ctx.w.begin_array();
            ctx.with_orient(Orient::Index, |ctx| {
                for (i, row) in frame.iter_rows().enumerate() {
                    if i > 0 {
                        ctx.w.item_sep();
                    }
                    encode_series(ctx, &row)?;
                }
                Ok(())
            })?;
            ctx.w.end_array();
            Ok(())
        }
        Orient::Index => {
            let keys = labels::encode_labels(ctx, frame.index().values(), frame.num_rows())?;
            ctx.w.begin_object();
            for (i, row) in frame.iter_rows().enumerate() {
                if i > 0 {
                    ctx.w.item_sep();
                }
                ctx.w.raw_key(&keys[i]);
                encode_series(ctx, &row)?;
            }
            ctx.w.end_object();
            Ok(())
        }
        Orient::Columns => {
            let keys = labels::encode_labels(ctx, frame.columns().values(), frame.num_columns())?;
            ctx.w.begin_object();
            for (j, column) in frame.iter_columns().enumerate() {
                if j > 0 {
                    ctx.w.item_sep();
                }
                ctx.w.raw_key(&keys[j]);
                encode_series(ctx, &column)?;
            }
            ctx.w.end_object();
            Ok(())
        }
        Orient::Values => {
            ctx.w.begin_array();
            for (i, row) in frame.iter_rows().enumerate() {
                if i > 0 {
                    ctx.w.item_sep();
                }
                encode_series(ctx, &row)?;
            }
            ctx.w.end_array();
            Ok(())
        }
    }
}
