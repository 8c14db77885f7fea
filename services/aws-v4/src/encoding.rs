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

//! Percent-encoding used by canonicalization.

use crate::constants::AWS_QUERY_ENCODE_SET;
use percent_encoding::{utf8_percent_encode, AsciiSet};

/// Percent-encode every byte of `input` that is part of `set`.
///
/// Hex digits are uppercase and space is always `%20`.
pub fn url_encode(input: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, set).to_string()
}

/// Percent-encode `input` with [`AWS_QUERY_ENCODE_SET`], leaving only
/// RFC 3986 unreserved characters as is.
pub fn uri_encode(input: &str) -> String {
    url_encode(input, &AWS_QUERY_ENCODE_SET)
}

/// Decode a percent-encoded query component.
///
/// `+` is decoded as space. Both `%XX` and `%uXXXX` escapes are accepted,
/// malformed escapes are kept literally and never fail.
pub fn url_decode(input: &str) -> String {
    decode(input, true)
}

/// Decode a percent-encoded path. Same as [`url_decode`] but `+` is kept.
pub fn url_decode_path(input: &str) -> String {
    decode(input, false)
}

fn decode(input: &str, plus_as_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    // Pending `%uXXXX` code units, kept together so surrogate pairs combine.
    let mut units: Vec<u16> = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                flush_utf16(&mut units, &mut out);
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if let Some(unit) = parse_utf16_escape(&bytes[i + 1..]) {
                    units.push(unit);
                    i += 6;
                    continue;
                }

                flush_utf16(&mut units, &mut out);
                match parse_hex_pair(&bytes[i + 1..]) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                flush_utf16(&mut units, &mut out);
                out.push(b);
                i += 1;
            }
        }
    }
    flush_utf16(&mut units, &mut out);

    String::from_utf8_lossy(&out).into_owned()
}

/// Parse `uXXXX` at the start of `rest`.
fn parse_utf16_escape(rest: &[u8]) -> Option<u16> {
    if rest.len() < 5 || rest[0] != b'u' {
        return None;
    }

    rest[1..5]
        .iter()
        .try_fold(0u16, |acc, b| Some(acc << 4 | hex_value(*b)? as u16))
}

/// Parse `XX` at the start of `rest`.
fn parse_hex_pair(rest: &[u8]) -> Option<u8> {
    if rest.len() < 2 {
        return None;
    }

    Some(hex_value(rest[0])? << 4 | hex_value(rest[1])?)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut Vec<u8>) {
    if units.is_empty() {
        return;
    }

    let mut buf = [0u8; 4];
    for c in char::decode_utf16(units.drain(..)) {
        let c = c.unwrap_or(char::REPLACEMENT_CHARACTER);
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
}
