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

//! Cross check signatures with the `aws-sigv4` crate.

use super::suite_credential;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest, SigningSettings,
    UriPathNormalizationMode,
};
use aws_sigv4::sign::v4;
use gatesign_aws_v4::{Credential, RequestSigner};
use gatesign_core::time::{now, DateTime};
use gatesign_core::SignRequest;
use http::Request;
use pretty_assertions::assert_eq;
use std::time::SystemTime;
use test_case::test_case;

fn aws_sigv4_signature(
    req: &Request<&'static str>,
    service: &str,
    cred: &Credential,
    time: DateTime,
) -> String {
    let mut ss = SigningSettings::default();
    if service == "s3" {
        ss.percent_encoding_mode = PercentEncodingMode::Single;
        ss.uri_path_normalization_mode = UriPathNormalizationMode::Disabled;
        ss.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
    }

    let id = Credentials::new(
        &cred.access_key_id,
        &cred.secret_access_key,
        cred.session_token.clone(),
        None,
        "hardcoded-credentials",
    )
    .into();
    let sp = v4::SigningParams::builder()
        .identity(&id)
        .region("us-east-1")
        .name(service)
        .time(SystemTime::from(time))
        .settings(ss)
        .build()
        .expect("signing params must be valid");

    let output = aws_sigv4::http_request::sign(
        SignableRequest::new(
            req.method().as_str(),
            req.uri().to_string(),
            req.headers().iter().map(|(k, v)| {
                (
                    k.as_str(),
                    std::str::from_utf8(v.as_bytes()).expect("header value must be utf-8"),
                )
            }),
            SignableBody::Bytes(req.body().as_bytes()),
        )
        .expect("signable request must be valid"),
        &sp.into(),
    )
    .expect("aws-sigv4 must sign");

    let (_, signature) = output.into_parts();
    signature
}

fn get_object() -> Request<&'static str> {
    Request::get("https://bucket.s3.us-east-1.amazonaws.com/path/to/object.txt")
        .body("")
        .expect("request must be valid")
}

fn get_object_with_query() -> Request<&'static str> {
    Request::get("https://bucket.s3.us-east-1.amazonaws.com/?list-type=2&prefix=a%2Fb&delimiter=%2F")
        .body("")
        .expect("request must be valid")
}

fn get_object_with_port() -> Request<&'static str> {
    Request::get("http://127.0.0.1:9000/bucket/hello")
        .body("")
        .expect("request must be valid")
}

fn put_object() -> Request<&'static str> {
    Request::put("https://bucket.s3.us-east-1.amazonaws.com/hello%20world.txt")
        .header("x-amz-meta-owner", "gatesign")
        .body("Hello, World!")
        .expect("request must be valid")
}

fn post_json() -> Request<&'static str> {
    Request::post("https://execute-api.us-east-1.amazonaws.com/prod/items?b=2&a=1")
        .header("x-api-key", "api-key-value")
        .body(r#"{"name":"gatesign"}"#)
        .expect("request must be valid")
}

fn get_utf8_header() -> Request<&'static str> {
    Request::get("https://execute-api.us-east-1.amazonaws.com/prod/items/%E3%83%86")
        .header("x-note", http::HeaderValue::from_bytes("テスト".as_bytes()).expect("value must be valid"))
        .body("")
        .expect("request must be valid")
}

#[test_case("s3", get_object, false; "s3 get object")]
#[test_case("s3", get_object_with_query, false; "s3 get object with query")]
#[test_case("s3", get_object_with_port, false; "s3 get object with port")]
#[test_case("s3", put_object, true; "s3 put object with token")]
#[test_case("execute-api", post_json, false; "execute-api post json")]
#[test_case("execute-api", post_json, true; "execute-api post json with token")]
#[test_case("execute-api", get_utf8_header, false; "execute-api get utf8 header")]
fn test_compare_with_aws_sigv4(
    service: &str,
    req_fn: fn() -> Request<&'static str>,
    with_token: bool,
) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut cred = suite_credential();
    if with_token {
        cred.session_token = Some("notarealsessiontoken".to_string());
    }
    let now = now();

    let expected = aws_sigv4_signature(&req_fn(), service, &cred, now);

    let (mut parts, body) = req_fn().into_parts();
    let output = RequestSigner::new(service, "us-east-1")
        .with_time(now)
        .sign_request(&mut parts, Some(body.as_bytes()), Some(&cred))
        .expect("sign must succeed");

    let actual = output
        .authorization()
        .rsplit_once("Signature=")
        .map(|(_, sig)| sig)
        .expect("authorization must carry signature");
    assert_eq!(expected, actual, "canonical request:\n{}", output.canonical_request());
}
