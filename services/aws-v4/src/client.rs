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

use crate::{Credential, RequestSigner, SigningOutput};
use bytes::Bytes;
use gatesign_core::{Context, ProvideCredential, Result, Signer};
use http::{Method, Request, Response, Uri};
use log::debug;

/// Generates `name(uri, body)` wrappers for methods with a body and
/// `name(uri)` wrappers for methods without one.
macro_rules! verbs {
    (with body: $($name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Sign and send a `", stringify!($method), "` request with `body`.")]
            pub async fn $name(&self, uri: &str, body: impl Into<Bytes>) -> Result<Response<Bytes>> {
                self.send_with(Method::$method, uri, body.into()).await
            }
        )*
    };
    ($($name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Sign and send a `", stringify!($method), "` request.")]
            pub async fn $name(&self, uri: &str) -> Result<Response<Bytes>> {
                self.send_with(Method::$method, uri, Bytes::new()).await
            }
        )*
    };
}

/// SigningClient signs requests and sends them through the context's
/// [`gatesign_core::HttpSend`].
///
/// Relative uris are resolved against the signer's base uri and the
/// signer's default headers are written into the request before it's
/// sent, so the wire request is exactly what was signed.
#[derive(Clone, Debug)]
pub struct SigningClient {
    ctx: Context,
    signer: Signer<Credential, SigningOutput>,
    request_signer: RequestSigner,
}

impl SigningClient {
    /// Create a new client.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = Credential>,
        request_signer: RequestSigner,
    ) -> Self {
        let signer = Signer::new(ctx.clone(), loader, request_signer.clone());
        Self {
            ctx,
            signer,
            request_signer,
        }
    }

    /// Sign the request and send it.
    pub async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        let (mut parts, body) = req.into_parts();

        self.signer.sign(&mut parts, Some(&body[..])).await?;
        parts.uri = self.request_signer.resolve_uri(&parts.uri)?;
        self.request_signer.apply_default_headers(&mut parts.headers);
        debug!("sending signed request: {} {}", parts.method, parts.uri);

        self.ctx.http_send(Request::from_parts(parts, body)).await
    }

    verbs!(
        get => GET,
        head => HEAD,
        delete => DELETE,
    );

    verbs!(with body:
        post => POST,
        put => PUT,
        patch => PATCH,
    );

    async fn send_with(&self, method: Method, uri: &str, body: Bytes) -> Result<Response<Bytes>> {
        let uri: Uri = uri.parse()?;
        let req = Request::builder().method(method).uri(uri).body(body)?;
        self.send(req).await
    }
}
