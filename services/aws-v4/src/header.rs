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

use gatesign_core::{Error, Result};
use http::header::USER_AGENT;
use http::HeaderMap;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// DefaultHeaderMerge decides how transport default headers meet the
/// request's own headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultHeaderMerge {
    /// Use a default header only if the request doesn't carry that name.
    #[default]
    PreferRequest,
    /// Always send default values, after the request's own values.
    Append,
}

impl FromStr for DefaultHeaderMerge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefer-request" => Ok(Self::PreferRequest),
            "append" => Ok(Self::Append),
            v => Err(Error::config_invalid(format!(
                "unknown default header merge policy: {v}, expect prefer-request or append"
            ))),
        }
    }
}

/// Trim a header value and collapse inner whitespace runs into one space.
pub fn normalize_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// CanonicalHeaders is the signed view of request headers.
///
/// Names are lowercase and sorted, values are normalized and joined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalHeaders {
    headers: BTreeMap<String, String>,
}

impl CanonicalHeaders {
    /// Build canonical headers from request headers and transport defaults.
    pub fn build(
        headers: &HeaderMap,
        default_headers: &HeaderMap,
        merge: DefaultHeaderMerge,
        separator: &str,
    ) -> Result<Self> {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (name, value) in headers {
            values
                .entry(name.as_str().to_string())
                .or_default()
                .push(header_value(name.as_str(), value.as_bytes())?);
        }

        for (name, value) in default_headers {
            if merge == DefaultHeaderMerge::PreferRequest && headers.contains_key(name) {
                continue;
            }
            values
                .entry(name.as_str().to_string())
                .or_default()
                .push(header_value(name.as_str(), value.as_bytes())?);
        }

        let headers = values
            .into_iter()
            .map(|(name, vs)| {
                let sep = if name == USER_AGENT.as_str() {
                    " "
                } else {
                    separator
                };
                let joined = vs.join(sep);
                (name, joined)
            })
            .collect();

        Ok(Self { headers })
    }

    /// Header names joined by `;`.
    pub fn signed_headers(&self) -> String {
        self.headers
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Get the canonical value of given header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Lines of `name:value`, each ended by `\n`.
impl Display for CanonicalHeaders {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{name}:{value}")?;
        }
        Ok(())
    }
}

fn header_value(name: &str, value: &[u8]) -> Result<String> {
    let value = std::str::from_utf8(value).map_err(|err| {
        Error::request_invalid(format!("header {name} has a non utf-8 value"))
            .with_source(err)
    })?;
    Ok(normalize_header_value(value))
}
