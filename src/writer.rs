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

//! The JSON token writer: output buffer, structural punctuation, string
//! escaping and numeric formatting.

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Append `\uXXXX` for a single UTF-16 code unit.
fn push_unicode_escape(dst: &mut String, unit: u16) {
    dst.push_str("\\u");
    dst.push(HEX[(unit >> 12 & 0xf) as usize] as char);
    dst.push(HEX[(unit >> 8 & 0xf) as usize] as char);
    dst.push(HEX[(unit >> 4 & 0xf) as usize] as char);
    dst.push(HEX[(unit & 0xf) as usize] as char);
}

/// Escape `text` into `dst` without the surrounding quotes.
///
/// Control characters are always escaped. `escape_html` additionally escapes
/// `<`, `>` and `&`; `ensure_ascii` escapes every non-ASCII character, using
/// surrogate pairs beyond the BMP.
pub(crate) fn escape_str(dst: &mut String, text: &str, ensure_ascii: bool, escape_html: bool) {
    for ch in text.chars() {
        match ch {
            '"' => dst.push_str("\\\""),
            '\\' => dst.push_str("\\\\"),
            '\u{8}' => dst.push_str("\\b"),
            '\u{c}' => dst.push_str("\\f"),
            '\n' => dst.push_str("\\n"),
            '\r' => dst.push_str("\\r"),
            '\t' => dst.push_str("\\t"),
            c if (c as u32) < 0x20 => push_unicode_escape(dst, c as u16),
            '<' | '>' | '&' if escape_html => push_unicode_escape(dst, ch as u16),
            c if ensure_ascii && !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    push_unicode_escape(dst, *unit);
                }
            }
            c => dst.push(c),
        }
    }
}

/// Format a finite double with at most `precision` digits after the decimal
/// point, trimming trailing zeros but keeping one fractional digit.
pub(crate) fn format_double(value: f64, precision: usize) -> String {
    debug_assert!(value.is_finite());
    if precision == 0 {
        return format!("{value:.0}");
    }
    let mut text = format!("{value:.precision$}");
    if let Some(dot) = text.find('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed.max(dot + 2));
    }
    text
}

/// Growable JSON output buffer.
///
/// Only valid token sequences are produced by the encoder, so the writer
/// itself is infallible; all failure paths live above it.
pub(crate) struct JsonWriter {
    buf: String,
    double_precision: usize,
    ensure_ascii: bool,
    escape_html: bool,
}

impl JsonWriter {
    pub fn new(double_precision: u8, ensure_ascii: bool, escape_html: bool) -> Self {
        Self {
            buf: String::with_capacity(256),
            double_precision: double_precision as usize,
            ensure_ascii,
            escape_html,
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }

    pub fn begin_array(&mut self) {
        self.buf.push('[');
    }

    pub fn end_array(&mut self) {
        self.buf.push(']');
    }

    pub fn begin_object(&mut self) {
        self.buf.push('{');
    }

    pub fn end_object(&mut self) {
        self.buf.push('}');
    }

    pub fn item_sep(&mut self) {
        self.buf.push(',');
    }

    pub fn null(&mut self) {
        self.buf.push_str("null");
    }

    pub fn bool(&mut self, value: bool) {
        self.buf.push_str(if value { "true" } else { "false" });
    }

    pub fn long(&mut self, value: i64) {
        let mut scratch = itoa::Buffer::new();
        self.buf.push_str(scratch.format(value));
    }

    pub fn ulong(&mut self, value: u64) {
        let mut scratch = itoa::Buffer::new();
        self.buf.push_str(scratch.format(value));
    }

    pub fn double(&mut self, value: f64) {
        let text = format_double(value, self.double_precision);
        self.buf.push_str(&text);
    }

    /// Doubles that may be nan/inf; non-finite values emit `null`.
    pub fn optional_double(&mut self, value: f64) {
        if value.is_finite() {
            self.double(value);
        } else {
            self.null();
        }
    }

    pub fn string(&mut self, text: &str) {
        let (ensure_ascii, escape_html) = (self.ensure_ascii, self.escape_html);
        self.buf.push('"');
        escape_str(&mut self.buf, text, ensure_ascii, escape_html);
        self.buf.push('"');
    }

    /// An object key: escaped string plus the colon.
    pub fn key(&mut self, text: &str) {
        self.string(text);
        self.buf.push(':');
    }

    /// An object key whose text is already escaped (the pre-encoded label
    /// cache); the writer adds the quotes and colon.
    pub fn raw_key(&mut self, escaped: &str) {
        self.buf.push('"');
        self.buf.push_str(escaped);
        self.buf.push_str("\":");
    }

    pub(crate) fn ensure_ascii(&self) -> bool {
        self.ensure_ascii
    }

    pub(crate) fn escape_html(&self) -> bool {
        self.escape_html
    }

    pub(crate) fn double_precision(&self) -> usize {
        self.double_precision
    }
}
