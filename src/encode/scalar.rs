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

//! Primitive coercers for scalar payloads.

use bigdecimal::{BigDecimal, ToPrimitive};
use snafu::ResultExt;

use super::Ctx;
use crate::error::{InvalidUtf8Snafu, Result};

/// Byte strings must hold valid UTF-8; they encode as JSON strings.
pub(crate) fn encode_bytes(ctx: &mut Ctx<'_>, bytes: &[u8]) -> Result<()> {
    let text = std::str::from_utf8(bytes).context(InvalidUtf8Snafu)?;
    ctx.w.string(text);
    Ok(())
}

/// Lossy conversion; values outside the double range collapse to nan and
/// encode as null.
pub(crate) fn decimal_to_double(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
