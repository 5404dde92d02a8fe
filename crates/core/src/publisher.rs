use crate::throttle::Throttle;
use crate::traits::DocumentSink;
use crate::{IndexDocument, PublishOutcome, PublishTarget};
use tracing::{debug, error};

pub struct Publisher<S, T> {
    sink: S,
    throttle: T,
}

impl<S, T> Publisher<S, T>
where
    S: DocumentSink,
    T: Throttle,
{
    pub fn new(sink: S, throttle: T) -> Self {
        Self { sink, throttle }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Backend failures are logged and reported as `Failed`; they never stop the run.
    pub async fn publish(&self, target: &PublishTarget, document: &IndexDocument) -> PublishOutcome {
        let outcome = match self.sink.put_document(target, document).await {
            Ok(()) => {
                debug!(publish_target = %target, tokens = document.tokens.len(), "published document");
                PublishOutcome::Published
            }
            Err(err) => {
                error!(publish_target = %target, error = %err, "index backend rejected document");
                PublishOutcome::Failed
            }
        };

        self.throttle.pause().await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::RecordingSink;
    use crate::throttle::FixedDelay;
    use crate::PublishError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    struct RejectingSink;

    #[async_trait]
    impl DocumentSink for RejectingSink {
        async fn put_document(
            &self,
            _target: &PublishTarget,
            _document: &IndexDocument,
        ) -> Result<(), PublishError> {
            Err(PublishError::BackendResponse {
                backend: "test".to_string(),
                status: 503,
                details: "unavailable".to_string(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct CountingThrottle {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Throttle for CountingThrottle {
        async fn pause(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn document() -> IndexDocument {
        IndexDocument {
            url: Some("http://example.com/a".to_string()),
            title: vec!["cat".to_string()],
            tokens: vec!["cat".to_string()],
        }
    }

    #[tokio::test]
    async fn successful_publish_is_recorded_and_throttled() {
        let throttle = CountingThrottle::default();
        let publisher = Publisher::new(RecordingSink::new(), throttle.clone());

        let outcome = publisher
            .publish(&PublishTarget::new("pages", "a.html"), &document())
            .await;

        assert_eq!(outcome, PublishOutcome::Published);
        assert_eq!(publisher.sink().writes().len(), 1);
        assert_eq!(throttle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn backend_failure_is_not_fatal_and_still_throttled() {
        let throttle = CountingThrottle::default();
        let publisher = Publisher::new(RejectingSink, throttle.clone());

        let outcome = publisher
            .publish(&PublishTarget::new("pages", "a.html"), &document())
            .await;

        assert_eq!(outcome, PublishOutcome::Failed);
        assert_eq!(throttle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fixed_delay_follows_each_publish() {
        let publisher = Publisher::new(RecordingSink::new(), FixedDelay::new(Duration::from_millis(20)));
        let started = Instant::now();

        for name in ["a.html", "b.html"] {
            publisher
                .publish(&PublishTarget::new("pages", name), &document())
                .await;
        }

        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
