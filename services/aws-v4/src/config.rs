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

use crate::constants::{GATESIGN_DEFAULT_HEADER_MERGE, GATESIGN_HEADER_VALUE_SEPARATOR};
use crate::header::DefaultHeaderMerge;
use gatesign_core::Context;
use log::warn;

/// Config carries the canonicalization knobs used while signing.
///
/// There is no global state: every [`crate::RequestSigner`] owns its own
/// `Config`, so signers with different settings can run side by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Separator used to join multiple values of the same header.
    ///
    /// Defaults to `,`, which is how a verifying gateway folds repeated
    /// header lines received over the wire.
    pub header_value_separator: String,
    /// How default headers are merged into the request headers.
    pub default_header_merge: DefaultHeaderMerge,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_value_separator: ",".to_string(),
            default_header_merge: DefaultHeaderMerge::default(),
        }
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Values that can't be understood are ignored with a warning, the
    /// current value is kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(GATESIGN_HEADER_VALUE_SEPARATOR) {
            if v.is_empty() {
                warn!("{GATESIGN_HEADER_VALUE_SEPARATOR} is empty, ignored");
            } else {
                self.header_value_separator = v;
            }
        }

        if let Some(v) = ctx.env_var(GATESIGN_DEFAULT_HEADER_MERGE) {
            match v.parse() {
                Ok(merge) => self.default_header_merge = merge,
                Err(err) => warn!("{GATESIGN_DEFAULT_HEADER_MERGE} is ignored: {err}"),
            }
        }

        self
    }

    /// Set the header value separator.
    pub fn with_header_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.header_value_separator = separator.into();
        self
    }

    /// Set the default header merge policy.
    pub fn with_default_header_merge(mut self, merge: DefaultHeaderMerge) -> Self {
        self.default_header_merge = merge;
        self
    }
}
