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

//! AWS SigV4 request signing for API gateways.
//!
//! The signing engine is made of small pure building blocks that can be
//! used on their own:
//!
//! - [`url_encode`] / [`url_decode`]: canonical percent-encoding.
//! - [`CanonicalQuery`]: query parameter normalization.
//! - [`CanonicalHeaders`]: header normalization and default-header merging.
//! - [`payload_hash`]: body digest.
//! - [`CanonicalRequest`], [`StringToSign`], [`generate_signing_key`] and
//!   [`build_authorization_header`].
//!
//! [`RequestSigner`] chains them together, and [`SigningClient`] signs and
//! sends through a [`gatesign_core::HttpSend`].
//!
//! ## Example
//!
//! ```
//! use gatesign_aws_v4::{Credential, RequestSigner};
//! use gatesign_core::SignRequest;
//!
//! # fn main() -> gatesign_core::Result<()> {
//! let cred = Credential {
//!     access_key_id: "AKIDEXAMPLE".to_string(),
//!     secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
//!     ..Default::default()
//! };
//!
//! let (mut parts, _) = http::Request::get("https://example.amazonaws.com/")
//!     .body(())?
//!     .into_parts();
//!
//! let signer = RequestSigner::new("service", "us-east-1");
//! let output = signer.sign_request(&mut parts, None, Some(&cred))?;
//! assert!(parts.headers.contains_key(http::header::AUTHORIZATION));
//! assert!(output.authorization().starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::AWS_QUERY_ENCODE_SET;
pub use constants::AWS_URI_ENCODE_SET;
pub use constants::EMPTY_STRING_SHA256;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod encoding;
pub use encoding::{uri_encode, url_decode, url_decode_path, url_encode};

mod query;
pub use query::CanonicalQuery;

mod header;
pub use header::{normalize_header_value, CanonicalHeaders, DefaultHeaderMerge};

mod payload;
pub use payload::payload_hash;

mod canonical_request;
pub use canonical_request::{canonical_uri, resolve_uri, CanonicalRequest};

mod string_to_sign;
pub use string_to_sign::{credential_scope, StringToSign};

mod signature;
pub use signature::{build_authorization_header, calculate_signature, generate_signing_key};

mod sign_request;
pub use sign_request::{RequestSigner, SigningOutput};

mod provide_credential;
pub use provide_credential::{EnvCredentialProvider, StaticCredentialProvider};

mod client;
pub use client::SigningClient;
