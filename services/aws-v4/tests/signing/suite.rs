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

//! Vectors from the AWS SigV4 test suite.

use super::{suite_credential, suite_time};
use gatesign_aws_v4::RequestSigner;
use gatesign_core::SignRequest;
use http::{HeaderValue, Method, Request};
use pretty_assertions::assert_eq;
use test_case::test_case;

const EMPTY: &[u8] = b"";

#[test_case(
    Method::GET, "https://example.amazonaws.com/", &[], EMPTY,
    "host;x-amz-date",
    "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31";
    "get-vanilla"
)]
#[test_case(
    Method::POST, "https://example.amazonaws.com/", &[], EMPTY,
    "host;x-amz-date",
    "5da7c1a2acd57cee7505fc6676e4e544621c30862966e37dddb68e92efbe5d6b";
    "post-vanilla"
)]
#[test_case(
    Method::GET, "https://example.amazonaws.com/?Param2=value2&Param1=value1", &[], EMPTY,
    "host;x-amz-date",
    "b97d918cfa904a5beff61c982a1b6f458b799221646efd99d3219ec94cdf2500";
    "get-vanilla-query-order-key-case"
)]
#[test_case(
    Method::GET, "https://example.amazonaws.com/?Param1=value2&Param1=value1", &[], EMPTY,
    "host;x-amz-date",
    "5772eed61e12b33fae39ee5e7012498b51d56abc0abb7c60486157bd471c4694";
    "get-vanilla-query-order-value"
)]
#[test_case(
    Method::GET,
    "https://example.amazonaws.com/?-._~0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz=-._~0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    &[], EMPTY,
    "host;x-amz-date",
    "9c3e54bfcdf0b19771a7f523ee5669cdf59bc7cc0884027167c21bb143a40197";
    "get-vanilla-query-unreserved"
)]
#[test_case(
    Method::GET, "https://example.amazonaws.com/?%E1%88%B4=bar", &[], EMPTY,
    "host;x-amz-date",
    "2cdec8eed098649ff3a119c94853b13c643bcf08f8b0a1d91e12c9027818dd04";
    "get-vanilla-utf8-query"
)]
#[test_case(
    Method::GET, "https://example.amazonaws.com/",
    &[("my-header1", "value2"), ("my-header1", "value2"), ("my-header1", "value1")], EMPTY,
    "host;my-header1;x-amz-date",
    "c9d5ea9f3f72853aea855b47ea873832890dbdd183b4468f858259531a5138ea";
    "get-header-key-duplicate"
)]
#[test_case(
    Method::POST, "https://example.amazonaws.com/",
    &[("content-type", "application/x-www-form-urlencoded")], &b"Param1=value1"[..],
    "content-type;host;x-amz-date",
    "ff11897932ad3f4e8b18135d722051e5ac45fc38421b1da7b9d196a0fe09473a";
    "post-x-www-form-urlencoded"
)]
fn test_suite(
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: &[u8],
    signed_headers: &str,
    signature: &str,
) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, HeaderValue::from_str(value).expect("value must be valid"));
    }
    let (mut parts, _) = builder.body(()).expect("request must be valid").into_parts();

    let signer = RequestSigner::new("service", "us-east-1").with_time(suite_time());
    let output = signer
        .sign_request(&mut parts, Some(body), Some(&suite_credential()))
        .expect("sign must succeed");

    assert_eq!(
        output.authorization(),
        format!(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, SignedHeaders={signed_headers}, Signature={signature}"
        )
    );
    assert_eq!(parts.headers["x-amz-date"], "20150830T123600Z");
    assert_eq!(parts.headers["host"], "example.amazonaws.com");
}

#[test]
fn test_suite_get_vanilla_with_session_token() {
    let (mut parts, _) = Request::get("https://example.amazonaws.com/")
        .body(())
        .expect("request must be valid")
        .into_parts();

    let mut cred = suite_credential();
    cred.session_token = Some("AQoDYXdzEPT//////////wEXAMPLEtc764bNrC9SAPBSM22wDOk4x4HIZ8j4FZTwdQWLWsKWHGBuFqwAeMicRXmxfpSPfIeoIYRqTflfKD8YUuwthAx7mSEI/qkPpKPi/kMcGdQrmGdeehM4IC1NtBmUpp2wUE8phUZampKsburEDy0KPkyQDYwT7WZ0wq5VSXDvp75YU9HFvlRd8Tx6q6fE8YQcHNVXAkiY9q6d+xo0rKwT38xVqr7ZD0u0iPPkUL64lIZbqBAz+scqKmlzm8FDrypNC9Yjc8fPOLn9FX9KSYvKTr4rvx3iSIlTJabIQwj2ICCR/oLxBA==".to_string());

    let output = RequestSigner::new("service", "us-east-1")
        .with_time(suite_time())
        .sign_request(&mut parts, None, Some(&cred))
        .expect("sign must succeed");

    assert!(output.authorization().ends_with(
        "SignedHeaders=host;x-amz-date;x-amz-security-token, Signature=c8db8b9676d526f735dac5330f17623554c6cad1e2980d321903e9a3884c051b"
    ));
}
