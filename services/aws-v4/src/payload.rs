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

use crate::constants::EMPTY_STRING_SHA256;
use gatesign_core::hash::hex_sha256;
use std::borrow::Cow;

/// Hex encoded SHA256 of the request body.
///
/// A missing body hashes the same as an empty one.
pub fn payload_hash(body: Option<&[u8]>) -> Cow<'static, str> {
    match body {
        None => Cow::Borrowed(EMPTY_STRING_SHA256),
        Some(body) => Cow::Owned(hex_sha256(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_hash_empty() {
        assert_eq!(payload_hash(None), EMPTY_STRING_SHA256);
        assert_eq!(payload_hash(Some(b"")), EMPTY_STRING_SHA256);
    }

    #[test]
    fn test_payload_hash() {
        assert_eq!(
            payload_hash(Some(b"Param1=value1")),
            "9095672bbd1f56dfc5b65f3e153adc8731a4a654192329106275f4c7b24d0b6e"
        );
    }
}
