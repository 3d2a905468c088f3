//! # View Invalidation Signals
//!
//! After every mutation the handlers mark the affected public views as
//! stale. The signal has no semantic effect on the API itself; it only
//! prompts a presentation layer to refetch. Subscribers receive the
//! stale paths over a broadcast channel; with no subscribers the signal
//! is just logged.

use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 64;

/// Handle for publishing view-staleness events.
#[derive(Clone)]
pub struct Revalidator {
    tx: broadcast::Sender<String>,
}

impl Revalidator {
    /// Create a fresh revalidator with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
        }
    }

    /// Mark a view path stale.
    pub fn invalidate(&self, path: &str) {
        debug!(path = %path, "View marked stale");
        // A send error only means nobody is listening right now.
        let _ = self.tx.send(path.to_string());
    }

    /// Subscribe to staleness events.
    pub fn subscribe(&self) -> broadcast::Receiver<String> { self.tx.subscribe() }
}

impl Default for Revalidator {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_reaches_subscriber() {
        let revalidator = Revalidator::new();
        let mut rx = revalidator.subscribe();

        revalidator.invalidate("/articles");

        assert_eq!(rx.recv().await.unwrap(), "/articles");
    }

    #[test]
    fn test_invalidate_without_subscribers_is_silent() {
        let revalidator = Revalidator::new();
        revalidator.invalidate("/stories");
    }
}
