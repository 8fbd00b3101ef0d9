//! At most one pending reversal per input submission.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ReversalRegistry;
use crate::classify::Classification;
use crate::types::ReversalOutcome;

/// Tracks the reversal attempt belonging to the current submission.
///
/// Submitting again cancels whatever attempt is still pending. Cancellation is
/// cooperative: the superseded call stops waiting and resolves to `None`, and
/// whatever the lookup eventually produces is dropped.
#[derive(Debug, Default)]
pub struct ReversalSession {
    pending: Mutex<Pending>,
}

#[derive(Debug, Default)]
struct Pending {
    /// Bumped on every submission; identifies whose token is stored.
    generation: u64,
    token: Option<CancellationToken>,
}

impl ReversalSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a reversal attempt, superseding any pending one.
    ///
    /// Returns `None` if this attempt was itself superseded or cancelled
    /// before it finished.
    pub async fn submit(
        &self,
        registry: &ReversalRegistry,
        input: &str,
        candidates: &Classification<'_>,
    ) -> Option<ReversalOutcome> {
        let token = CancellationToken::new();
        let (generation, previous) = {
            let mut pending = self.lock();
            pending.generation = pending.generation.wrapping_add(1);
            (pending.generation, pending.token.replace(token.clone()))
        };
        if let Some(previous) = previous {
            debug!("superseding pending reversal attempt");
            previous.cancel();
        }

        let outcome = tokio::select! {
            _ = token.cancelled() => {
                debug!("reversal attempt abandoned");
                None
            }
            outcome = registry.attempt_reversal(input, candidates) => Some(outcome),
        };

        // Clear the slot unless a newer submission has taken it
        let mut pending = self.lock();
        if pending.generation == generation {
            pending.token = None;
        }
        outcome
    }

    /// Whether an attempt is still in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock().token.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Abandon the pending attempt, if any.
    pub fn cancel(&self) {
        let pending = self.lock().token.take();
        if let Some(token) = pending {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::reversal::{ReversalError, ReversalProvider};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    const MD5_HELLO: &str = "5d41402abc4b2a76b9719d911017c592";

    struct Slow(Duration);

    #[async_trait]
    impl ReversalProvider for Slow {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn reverse(&self, _digest: &str) -> Result<Option<String>, ReversalError> {
            tokio::time::sleep(self.0).await;
            Ok(Some("hello".into()))
        }
    }

    fn registry(delay: Duration) -> ReversalRegistry {
        let mut registry = ReversalRegistry::empty();
        registry.register("MD5", Arc::new(Slow(delay)));
        registry
    }

    #[tokio::test]
    async fn test_single_submission_completes() {
        let session = ReversalSession::new();
        let registry = registry(Duration::from_millis(5));

        let outcome = session
            .submit(&registry, MD5_HELLO, &classify(MD5_HELLO))
            .await;

        assert_eq!(outcome, Some(ReversalOutcome::Found("hello".into())));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_second_submission_supersedes_first() {
        let session = ReversalSession::new();
        let registry = registry(Duration::from_millis(200));
        let candidates = classify(MD5_HELLO);

        let (first, second) = tokio::join!(
            session.submit(&registry, MD5_HELLO, &candidates),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                session.submit(&registry, MD5_HELLO, &candidates).await
            }
        );

        assert_eq!(first, None);
        assert_eq!(second, Some(ReversalOutcome::Found("hello".into())));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_superseded_attempt_keeps_newer_token() {
        let session = ReversalSession::new();
        let registry = registry(Duration::from_millis(200));
        let candidates = classify(MD5_HELLO);

        let (first, second, pending_after_first) = tokio::join!(
            session.submit(&registry, MD5_HELLO, &candidates),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                session.submit(&registry, MD5_HELLO, &candidates).await
            },
            async {
                // The first attempt has already given up by now
                tokio::time::sleep(Duration::from_millis(60)).await;
                session.is_pending()
            }
        );

        assert_eq!(first, None);
        assert!(pending_after_first);
        assert!(second.is_some());
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_noop() {
        let session = ReversalSession::new();
        let registry = registry(Duration::from_millis(5));
        let candidates = classify(MD5_HELLO);

        session.submit(&registry, MD5_HELLO, &candidates).await;
        assert!(!session.is_pending());
        session.cancel();

        let outcome = session.submit(&registry, MD5_HELLO, &candidates).await;
        assert_eq!(outcome, Some(ReversalOutcome::Found("hello".into())));
    }

    #[tokio::test]
    async fn test_cancel_abandons_pending_attempt() {
        let session = ReversalSession::new();
        let registry = registry(Duration::from_millis(200));
        let candidates = classify(MD5_HELLO);

        let (outcome, ()) = tokio::join!(
            session.submit(&registry, MD5_HELLO, &candidates),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                session.cancel();
            }
        );

        assert_eq!(outcome, None);
    }

    #[test]
    fn test_cancel_without_pending_is_noop() {
        ReversalSession::new().cancel();
    }
}
