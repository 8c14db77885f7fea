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

use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// It resolves the credential through a [`ProvideCredential`], keeps it while
/// it stays valid, and hands the snapshot to a synchronous [`SignRequest`].
pub struct Signer<K: SigningCredential, O> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K, Output = O>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential, O> Clone for Signer<K, O> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            loader: self.loader.clone(),
            builder: self.builder.clone(),
            credential: self.credential.clone(),
        }
    }
}

impl<K: SigningCredential, O> Debug for Signer<K, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("ctx", &self.ctx)
            .field("loader", &self.loader)
            .field("builder", &self.builder)
            .finish()
    }
}

impl<K: SigningCredential, O: 'static> Signer<K, O> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K, Output = O>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        body: Option<&[u8]>,
    ) -> Result<O> {
        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            debug!("cached credential is absent or invalid, loading a new one");
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.builder.sign_request(req, body, credential.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential {
        token: String,
    }

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.token.is_empty()
        }
    }

    #[derive(Debug, Default)]
    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        token: &'static str,
    }

    #[async_trait]
    impl ProvideCredential for CountingLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.token.is_empty() {
                return Ok(None);
            }
            Ok(Some(TestCredential {
                token: self.token.to_string(),
            }))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    impl SignRequest for HeaderSigner {
        type Credential = TestCredential;
        type Output = String;

        fn sign_request(
            &self,
            req: &mut http::request::Parts,
            body: Option<&[u8]>,
            credential: Option<&Self::Credential>,
        ) -> Result<String> {
            let Some(cred) = credential else {
                return Err(Error::credential_invalid("credential is required"));
            };
            let value = format!("{}:{}", cred.token, body.map(|b| b.len()).unwrap_or(0));
            req.headers.insert("x-test-signature", value.parse()?);
            Ok(value)
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::get("https://example.amazonaws.com/")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_signer_caches_valid_credential() -> anyhow::Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: calls.clone(),
            token: "token",
        };
        let signer = Signer::new(Context::new(), loader, HeaderSigner);

        let mut req = parts();
        let out = signer.sign(&mut req, Some(b"hello")).await?;
        assert_eq!(out, "token:5");
        assert_eq!(req.headers["x-test-signature"], "token:5");

        let mut req = parts();
        signer.sign(&mut req, None).await?;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_signer_without_credential() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: calls.clone(),
            token: "",
        };
        let signer = Signer::new(Context::new(), loader, HeaderSigner);

        let mut req = parts();
        let err = signer
            .sign(&mut req, None)
            .await
            .expect_err("missing credential must be rejected");
        assert!(err.is_credential_error());
        assert!(req.headers.get("x-test-signature").is_none());

        // An absent credential is never cached.
        let _ = signer.sign(&mut parts(), None).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
