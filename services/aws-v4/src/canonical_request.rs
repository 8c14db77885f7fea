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

use crate::config::Config;
use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, S3_SERVICE};
use crate::encoding::{url_decode_path, url_encode};
use crate::header::CanonicalHeaders;
use crate::query::CanonicalQuery;
use gatesign_core::{Error, Result};
use http::{HeaderMap, Method, Uri};
use std::fmt::{Display, Formatter};

/// CanonicalRequest is the normalized text form of a request that both the
/// caller and the verifying gateway hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalRequest {
    value: String,
    signed_headers: String,
}

impl CanonicalRequest {
    /// Build the canonical request.
    ///
    /// `uri` must be absolute, see [`resolve_uri`]. `headers` must already
    /// carry every header to be signed, `default_headers` are merged in
    /// with `config`'s policy.
    pub fn build(
        service: &str,
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        default_headers: &HeaderMap,
        payload_hash: &str,
        config: &Config,
    ) -> Result<Self> {
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::request_uri_invalid(format!(
                "uri {uri} is not absolute"
            )));
        }

        let path = canonical_uri(service, uri.path());
        let query = CanonicalQuery::parse(uri.query().unwrap_or_default());
        let headers = CanonicalHeaders::build(
            headers,
            default_headers,
            config.default_header_merge,
            &config.header_value_separator,
        )?;
        let signed_headers = headers.signed_headers();

        let value = format!(
            "{}\n{path}\n{query}\n{headers}\n{signed_headers}\n{payload_hash}",
            method.as_str()
        );

        Ok(Self {
            value,
            signed_headers,
        })
    }

    /// The canonical request string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Signed header names joined by `;`.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Build the canonical form of a URI path.
///
/// - `s3`: decode once and encode once, `/` and empty segments are kept.
/// - others: collapse repeated `/` and encode every raw segment, so an
///   existing escape like `%20` becomes `%2520`.
pub fn canonical_uri(service: &str, path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    if service == S3_SERVICE {
        return url_encode(&url_decode_path(path), &AWS_URI_ENCODE_SET);
    }

    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed
        .split('/')
        .map(|seg| url_encode(seg, &AWS_QUERY_ENCODE_SET))
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve the effective request uri.
///
/// An absolute `uri` is returned as is. A relative one is merged with
/// `base`: an absolute path replaces the base path, a relative path
/// replaces the last segment of it.
pub fn resolve_uri(uri: &Uri, base: Option<&Uri>) -> Result<Uri> {
    if uri.scheme().is_some() && uri.authority().is_some() {
        return Ok(uri.clone());
    }

    let Some(base) = base else {
        return Err(Error::request_uri_invalid(format!(
            "uri {uri} is relative but no base uri is configured"
        )));
    };
    let (Some(scheme), Some(authority)) = (base.scheme(), base.authority()) else {
        return Err(Error::request_uri_invalid(format!(
            "base uri {base} is not absolute"
        )));
    };

    // A network-path reference only borrows the scheme.
    if let Some(uri_authority) = uri.authority() {
        let path_and_query = uri.path_and_query().map_or("/", |v| v.as_str());
        let resolved = Uri::builder()
            .scheme(scheme.clone())
            .authority(uri_authority.clone())
            .path_and_query(path_and_query)
            .build()?;
        return Ok(resolved);
    }

    let path = uri.path();
    let path = if path.is_empty() {
        base.path().to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        let base_path = base.path();
        let dir = base_path.rfind('/').map_or("/", |idx| &base_path[..=idx]);
        format!("{dir}{path}")
    };

    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let resolved = Uri::builder()
        .scheme(scheme.clone())
        .authority(authority.clone())
        .path_and_query(path_and_query)
        .build()?;
    Ok(resolved)
}
