//! MD5 reversal against a public precomputed plaintext database.
//!
//! The service answers `GET <base>/<digest>` with the plaintext, or with an
//! empty body when the digest is unknown.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use super::http::{HttpFetch, UreqFetch};
use super::{ReversalError, ReversalProvider};

const DEFAULT_URL: &str = "https://www.nitrxgen.net/md5db";

/// Lookup provider for MD5 digests.
#[derive(Debug, Clone)]
pub struct Md5DbProvider<F = UreqFetch> {
    base_url: String,
    request_timeout: Duration,
    fetch: Arc<F>,
}

impl Md5DbProvider {
    /// Public endpoint used unless overridden with [`Self::with_base_url`].
    pub const DEFAULT_URL: &'static str = DEFAULT_URL;

    /// Provider talking to the public endpoint over `ureq`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fetch(UreqFetch)
    }
}

impl Default for Md5DbProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: HttpFetch> Md5DbProvider<F> {
    /// Provider using a custom transport.
    #[must_use]
    pub fn with_fetch(fetch: F) -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            fetch: Arc::new(fetch),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Socket-level timeout handed to the transport. The registry applies
    /// its own overall timeout on top of this.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lookup_url(&self, digest: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), digest)
    }
}

#[async_trait]
impl<F: HttpFetch> ReversalProvider for Md5DbProvider<F> {
    fn name(&self) -> &'static str {
        "md5db"
    }

    async fn reverse(&self, digest: &str) -> Result<Option<String>, ReversalError> {
        let url = self.lookup_url(digest);
        let fetch = Arc::clone(&self.fetch);
        let timeout = self.request_timeout;

        let body = tokio::task::spawn_blocking(move || fetch.get(&url, timeout))
            .await
            .map_err(|e| ReversalError::Join(e.to_string()))??;

        let plaintext = body.trim();
        trace!(known = !plaintext.is_empty(), "md5db answered");
        if plaintext.is_empty() {
            Ok(None)
        } else {
            Ok(Some(plaintext.to_string()))
        }
    }
}
