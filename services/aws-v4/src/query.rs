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

use crate::encoding::{uri_encode, url_decode};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Write};

/// CanonicalQuery is the sorted, decoded form of a request query.
///
/// Names are ordered by their UTF-8 bytes, which is the same as code point
/// order, so `Z` sorts before `a`. Values of a repeated name are sorted the
/// same way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalQuery {
    params: BTreeMap<String, Vec<String>>,
}

impl CanonicalQuery {
    /// Parse a raw query string, with or without the leading `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pair in raw.split('&').filter(|v| !v.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .entry(url_decode(name))
                .or_default()
                .push(url_decode(value));
        }
        for values in params.values_mut() {
            values.sort_unstable();
        }

        Self { params }
    }

    /// Iterate over decoded `(name, value)` pairs in canonical order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Returns true if the query has no parameter.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Display for CanonicalQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (idx, (name, value)) in self.params().enumerate() {
            if idx > 0 {
                f.write_char('&')?;
            }
            write!(f, "{}={}", uri_encode(name), uri_encode(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", ""; "empty")]
    #[test_case("?", ""; "only question mark")]
    #[test_case("?b=2&a=1", "a=1&b=2"; "sorted by name")]
    #[test_case("Param2=value2&Param1=value1", "Param1=value1&Param2=value2"; "key case")]
    #[test_case("a=1&B=2&b=0", "B=2&a=1&b=0"; "uppercase first")]
    #[test_case("Param1=Value2&Param1=Value1", "Param1=Value1&Param1=Value2"; "duplicate values")]
    #[test_case("a&&b=", "a=&b="; "missing value and empty segment")]
    #[test_case("=v", "=v"; "missing name")]
    #[test_case("k=a=b", "k=a%3Db"; "split on first equal")]
    #[test_case("key=a+b%20c", "key=a%20b%20c"; "space forms")]
    #[test_case("key=%7Euser%2a", "key=~user%2A"; "normalize escapes")]
    #[test_case("list-type=2&prefix=a/b", "list-type=2&prefix=a%2Fb"; "slash")]
    fn test_canonical_query(raw: &str, expected: &str) {
        assert_eq!(CanonicalQuery::parse(raw).to_string(), expected);
    }

    #[test]
    fn test_canonical_query_is_order_invariant() {
        let a = CanonicalQuery::parse("?b=2&a=1");
        let b = CanonicalQuery::parse("?a=1&b=2");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_canonical_query_params() {
        let q = CanonicalQuery::parse("x=2&x=1&a");
        let params: Vec<_> = q.params().collect();
        assert_eq!(params, vec![("a", ""), ("x", "1"), ("x", "2")]);
        assert!(!q.is_empty());
        assert!(CanonicalQuery::parse("&&").is_empty());
    }
}
