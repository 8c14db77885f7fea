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

use crate::canonical_request::CanonicalRequest;
use crate::constants::{ALGORITHM, TERMINATOR};
use gatesign_core::hash::hex_sha256;
use gatesign_core::time::{format_date, format_iso8601, DateTime};

/// Credential scope in `yyyyMMdd/region/service/aws4_request` form.
pub fn credential_scope(time: DateTime, region: &str, service: &str) -> String {
    format!("{}/{region}/{service}/{TERMINATOR}", format_date(time))
}

/// StringToSign is the text the signature is computed over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringToSign {
    value: String,
    scope: String,
}

impl StringToSign {
    /// Build the string to sign.
    ///
    /// `time` must be the same instant written into `x-amz-date`.
    pub fn build(
        time: DateTime,
        region: &str,
        service: &str,
        canonical_request: &CanonicalRequest,
    ) -> Self {
        let scope = credential_scope(time, region, service);
        let value = format!(
            "{ALGORITHM}\n{}\n{scope}\n{}",
            format_iso8601(time),
            hex_sha256(canonical_request.as_str().as_bytes())
        );

        Self { value, scope }
    }

    /// The string to sign.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The credential scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constants::EMPTY_STRING_SHA256;
    use chrono::{TimeZone, Utc};
    use http::{HeaderMap, HeaderValue, Method, Uri};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_to_sign_get_vanilla() {
        let time = Utc
            .with_ymd_and_hms(2015, 8, 30, 12, 36, 0)
            .single()
            .expect("time must be valid");

        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("example.amazonaws.com"));
        headers.insert("x-amz-date", HeaderValue::from_static("20150830T123600Z"));
        let creq = CanonicalRequest::build(
            "service",
            &Method::GET,
            &Uri::from_static("https://example.amazonaws.com/"),
            &headers,
            &HeaderMap::new(),
            EMPTY_STRING_SHA256,
            &Config::default(),
        )
        .expect("canonical request must be built");

        let sts = StringToSign::build(time, "us-east-1", "service", &creq);
        assert_eq!(sts.scope(), "20150830/us-east-1/service/aws4_request");
        assert_eq!(
            sts.as_str(),
            "AWS4-HMAC-SHA256\n20150830T123600Z\n20150830/us-east-1/service/aws4_request\nbb579772317eb040ac9ed261061d46c1f17a8133879d6129b6e1c25292927e63"
        );
    }
}
