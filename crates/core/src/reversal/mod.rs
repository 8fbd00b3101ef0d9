//! Digest reversal.
//!
//! A [`ReversalRegistry`] maps family names to [`ReversalProvider`]s. Given a
//! classification it picks the highest-ranked candidate that has a provider,
//! runs one bounded lookup, and folds whatever happens into a
//! [`ReversalOutcome`]. Nothing here retries or caches.

mod http;
mod md5db;
mod session;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::classify::Classification;
use crate::types::ReversalOutcome;

pub use http::{HttpFetch, UreqFetch};
pub use md5db::Md5DbProvider;
pub use session::ReversalSession;

/// Why a lookup did not produce an answer.
///
/// These never reach callers of [`ReversalRegistry::attempt_reversal`]; they
/// are logged and collapsed into [`ReversalOutcome::Unsupported`].
#[derive(Debug, thiserror::Error)]
pub enum ReversalError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("lookup service returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("lookup timed out after {0:?}")]
    TimedOut(Duration),

    #[error("lookup task failed: {0}")]
    Join(String),
}

/// Something that can try to map a digest back to a plaintext.
#[async_trait]
pub trait ReversalProvider: Send + Sync {
    /// Short identifier used in logs (e.g. "md5db").
    fn name(&self) -> &'static str;

    /// Look up `digest` (already trimmed).
    ///
    /// `Ok(None)` means the lookup worked but nothing is known.
    async fn reverse(&self, digest: &str) -> Result<Option<String>, ReversalError>;
}

/// Family name to provider associations.
#[derive(Clone)]
pub struct ReversalRegistry {
    providers: HashMap<String, Arc<dyn ReversalProvider>>,
    timeout: Duration,
}

impl ReversalRegistry {
    /// Applied to each attempt unless overridden with [`Self::with_timeout`].
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Registry with the default wiring: MD5 via [`Md5DbProvider`].
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("MD5", Arc::new(Md5DbProvider::new()));
        registry
    }

    /// Registry with no providers at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Associate `provider` with a family name, returning any provider it
    /// replaces.
    pub fn register(
        &mut self,
        family: impl Into<String>,
        provider: Arc<dyn ReversalProvider>,
    ) -> Option<Arc<dyn ReversalProvider>> {
        self.providers.insert(family.into(), provider)
    }

    #[must_use]
    pub fn supports(&self, family: &str) -> bool {
        self.providers.contains_key(family)
    }

    /// Family names with a provider, sorted.
    #[must_use]
    pub fn supported_families(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Try to recover a plaintext for `original_input`.
    ///
    /// Only the highest-ranked candidate with a provider is tried, and only
    /// once. Without such a candidate no lookup is made at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashorbit_core::{classify, ReversalOutcome, ReversalRegistry};
    ///
    /// # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    /// # rt.block_on(async {
    /// let digest = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    /// let candidates = classify(digest);
    ///
    /// // SHA-256 has no provider, so this returns without touching the network
    /// let outcome = ReversalRegistry::new().attempt_reversal(digest, &candidates).await;
    /// assert_eq!(
    ///     outcome,
    ///     ReversalOutcome::Unsupported(ReversalOutcome::NO_SUPPORT.to_string())
    /// );
    /// # });
    /// ```
    pub async fn attempt_reversal(
        &self,
        original_input: &str,
        candidates: &Classification<'_>,
    ) -> ReversalOutcome {
        let Some((family, provider)) = candidates
            .iter()
            .find_map(|f| self.providers.get(f.name).map(|p| (f.name, p)))
        else {
            debug!(
                candidates = candidates.len(),
                "no reversal provider for matched families"
            );
            return ReversalOutcome::no_support();
        };

        let digest = original_input.trim();
        debug!(family, provider = provider.name(), "attempting reversal");

        match tokio::time::timeout(self.timeout, provider.reverse(digest)).await {
            Ok(Ok(Some(plaintext))) if !plaintext.trim().is_empty() => {
                debug!(family, "digest reversed");
                ReversalOutcome::Found(plaintext)
            }
            Ok(Ok(_)) => {
                debug!(family, "digest unknown to provider");
                ReversalOutcome::NotFound
            }
            Ok(Err(error)) => {
                warn!(family, provider = provider.name(), %error, "reversal lookup failed");
                ReversalOutcome::failed()
            }
            Err(_) => {
                let error = ReversalError::TimedOut(self.timeout);
                warn!(family, provider = provider.name(), %error, "reversal lookup failed");
                ReversalOutcome::failed()
            }
        }
    }
}

impl Default for ReversalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReversalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReversalRegistry")
            .field("families", &self.supported_families())
            .field("timeout", &self.timeout)
            .finish()
    }
}
