//! Referenda loader - one fetch raced against a timeout and a cancel signal

use std::time::Duration;

use tokio::sync::oneshot;

use crate::chain::{ChainError, ChainSource};
use crate::models::{Referendum, ReferendumIndex};

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<(ReferendumIndex, Referendum)>),
    Failed(ChainError),
    /// A newer fetch or shutdown took over; nobody wants the result
    Cancelled,
}

/// Fetch every referendum from `source`.
///
/// The fetch future is dropped when the timeout elapses or `cancel_rx` fires,
/// which aborts the underlying request.
pub async fn load_referenda(
    source: &dyn ChainSource,
    timeout: Duration,
    cancel_rx: oneshot::Receiver<()>,
) -> LoadOutcome {
    tokio::select! {
        biased;

        _ = cancel_rx => LoadOutcome::Cancelled,
        result = tokio::time::timeout(timeout, source.referenda()) => match result {
            Ok(Ok(referenda)) => LoadOutcome::Loaded(referenda),
            Ok(Err(e)) => LoadOutcome::Failed(e),
            Err(_) => LoadOutcome::Failed(ChainError::Timeout(timeout)),
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::constants::FETCH_DATA_TIMEOUT;
    use crate::models::ClosedReferendum;

    /// Source that answers after `delay`, or never
    pub(crate) struct MockSource {
        pub delay: Option<Duration>,
        pub result: fn() -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError>,
        pub dropped: Arc<AtomicBool>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ChainSource for MockSource {
        async fn referenda(&self) -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError> {
            let _flag = DropFlag(self.dropped.clone());
            match self.delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => std::future::pending::<()>().await,
            }
            (self.result)()
        }

        fn describe(&self) -> String {
            String::from("mock")
        }
    }

    pub(crate) fn one_approved() -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError> {
        Ok(vec![(2, Referendum::Approved(ClosedReferendum(10, None, None)))])
    }

    fn mock(delay: Option<Duration>) -> MockSource {
        MockSource { delay, result: one_approved, dropped: Arc::new(AtomicBool::new(false)) }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loads_within_timeout() {
        let source = mock(Some(Duration::from_millis(100)));
        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let outcome = load_referenda(&source, FETCH_DATA_TIMEOUT, cancel_rx).await;
        assert!(matches!(outcome, LoadOutcome::Loaded(ref r) if r.len() == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_resolving_fetch_times_out() {
        let source = mock(None);
        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let started = tokio::time::Instant::now();

        let outcome = load_referenda(&source, FETCH_DATA_TIMEOUT, cancel_rx).await;

        assert!(matches!(outcome, LoadOutcome::Failed(ChainError::Timeout(t)) if t == FETCH_DATA_TIMEOUT));
        assert!(started.elapsed() >= Duration::from_millis(15000));
        assert!(source.dropped.load(Ordering::SeqCst), "request should be abandoned");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_abandons_request() {
        let source = mock(None);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let _ = cancel_tx.send(());
        let outcome = load_referenda(&source, FETCH_DATA_TIMEOUT, cancel_rx).await;
        assert!(matches!(outcome, LoadOutcome::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_error_is_reported() {
        let source = MockSource {
            delay: Some(Duration::from_millis(1)),
            result: || Err(ChainError::Status(502)),
            dropped: Arc::new(AtomicBool::new(false)),
        };
        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let outcome = load_referenda(&source, FETCH_DATA_TIMEOUT, cancel_rx).await;
        assert!(matches!(outcome, LoadOutcome::Failed(ChainError::Status(502))));
    }
}
