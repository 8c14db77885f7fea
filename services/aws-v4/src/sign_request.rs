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

use crate::canonical_request::{resolve_uri, CanonicalRequest};
use crate::config::Config;
use crate::constants::{S3_SERVICE, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
use crate::header::DefaultHeaderMerge;
use crate::payload::payload_hash;
use crate::signature::{build_authorization_header, calculate_signature, generate_signing_key};
use crate::string_to_sign::StringToSign;
use crate::Credential;
use gatesign_core::time::{format_iso8601, now, DateTime};
use gatesign_core::{Error, Result, SignRequest};
use http::header::{AUTHORIZATION, HOST};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Uri};
use log::debug;

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Besides the signing scope, it carries the transport settings a request
/// is signed against: the base uri used to resolve relative uris and the
/// default headers sent with every request.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
    base_uri: Option<Uri>,
    default_headers: HeaderMap,
    config: Config,
}

impl RequestSigner {
    /// Create a new builder for AWS V4 signer.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
            base_uri: None,
            default_headers: HeaderMap::new(),
            config: Config::default(),
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the base uri that relative request uris are resolved against.
    pub fn with_base_uri(mut self, base_uri: Uri) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Set the headers sent with every request.
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Set the canonicalization config.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Service of the signing scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region of the signing scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Config used by this signer.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `uri` against the configured base uri.
    pub fn resolve_uri(&self, uri: &Uri) -> Result<Uri> {
        resolve_uri(uri, self.base_uri.as_ref())
    }

    /// Write the default headers into `headers` with the configured merge
    /// policy, so the wire request matches what was signed.
    pub fn apply_default_headers(&self, headers: &mut HeaderMap) {
        for name in self.default_headers.keys() {
            if self.config.default_header_merge == DefaultHeaderMerge::PreferRequest
                && headers.contains_key(name)
            {
                continue;
            }
            for value in self.default_headers.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }
    }

    fn validate<'a>(
        &self,
        req: &Parts,
        credential: Option<&'a Credential>,
    ) -> Result<&'a Credential> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "credential is required to sign request",
            ));
        };
        if cred.access_key_id.is_empty() {
            return Err(Error::credential_invalid("access_key_id is empty"));
        }
        if cred.secret_access_key.is_empty() {
            return Err(Error::credential_invalid("secret_access_key is empty"));
        }

        if self.region.is_empty() {
            return Err(Error::config_invalid("region is required to sign request"));
        }
        if self.service.is_empty() {
            return Err(Error::config_invalid("service is required to sign request"));
        }

        for name in [X_AMZ_DATE, AUTHORIZATION.as_str()] {
            if req.headers.contains_key(name) {
                return Err(Error::request_invalid(format!(
                    "request already carries header {name}, refuse to sign it again"
                )));
            }
            if self.default_headers.contains_key(name) {
                return Err(Error::request_invalid(format!(
                    "default headers must not carry header {name}, it's written by the signer"
                )));
            }
        }

        Ok(cred)
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;
    type Output = SigningOutput;

    fn sign_request(
        &self,
        req: &mut Parts,
        body: Option<&[u8]>,
        credential: Option<&Self::Credential>,
    ) -> Result<SigningOutput> {
        let cred = self.validate(req, credential)?;

        let now = self.time.unwrap_or_else(now);
        let uri = self.resolve_uri(&req.uri)?;
        let payload_hash = payload_hash(body);

        // Work on a copy so that a rejected request is left untouched.
        let mut headers = req.headers.clone();
        headers.insert(X_AMZ_DATE, HeaderValue::from_str(&format_iso8601(now))?);
        if let Some(token) = &cred.session_token {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }
        if !headers.contains_key(HOST) {
            headers.insert(HOST, host_header_value(&uri)?);
        }
        if self.service == S3_SERVICE {
            headers.insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(&payload_hash)?);
        }

        let creq = CanonicalRequest::build(
            &self.service,
            &req.method,
            &uri,
            &headers,
            &self.default_headers,
            &payload_hash,
            &self.config,
        )?;
        debug!("calculated canonical request: {creq}");

        let string_to_sign = StringToSign::build(now, &self.region, &self.service, &creq);
        debug!("calculated scope: {}", string_to_sign.scope());
        debug!("calculated string to sign: {}", string_to_sign.as_str());

        let signing_key =
            generate_signing_key(&cred.secret_access_key, now, &self.region, &self.service);
        let signature = calculate_signature(&signing_key, string_to_sign.as_str());
        let authorization = build_authorization_header(
            &cred.access_key_id,
            string_to_sign.scope(),
            creq.signed_headers(),
            &signature,
        );

        let mut value = HeaderValue::from_str(&authorization)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        req.headers = headers;
        Ok(SigningOutput {
            canonical_request: creq.as_str().to_string(),
            string_to_sign: string_to_sign.as_str().to_string(),
            authorization,
        })
    }
}

/// `host[:port]` of the resolved uri, the port only when it's explicit.
fn host_header_value(uri: &Uri) -> Result<HeaderValue> {
    let Some(host) = uri.host() else {
        return Err(Error::request_uri_invalid(format!("uri {uri} has no host")));
    };

    let value = match uri.port_u16() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok(HeaderValue::from_str(&value)?)
}

/// SigningOutput carries the artifacts of one signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningOutput {
    canonical_request: String,
    string_to_sign: String,
    authorization: String,
}

impl SigningOutput {
    /// The canonical request.
    pub fn canonical_request(&self) -> &str {
        &self.canonical_request
    }

    /// The string to sign.
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// Value of the `authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}
