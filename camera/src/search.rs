//! Debounced location search input.
//!
//! The add-spot form queries the geocoder as the user types. Firing on every
//! keystroke would hammer the upstream, so a query only becomes runnable
//! once the input has been quiet for the configured delay. Same token
//! discipline as the camera controller: each submission bumps a generation
//! counter, and a held query is dropped if a newer one arrived while it
//! waited.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct QueryDebouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Hold `query` for the debounce delay. Yields `Some(query)` once the
    /// delay elapses with no newer submission, `None` if this keystroke was
    /// superseded before its query ever started.
    pub fn submit(&self, query: String) -> impl Future<Output = Option<String>> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        async move {
            sleep(delay).await;
            (generation.load(Ordering::SeqCst) == token).then_some(query)
        }
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_quiet_input_releases_query() {
        let debouncer = QueryDebouncer::default();

        let held = debouncer.submit("eiffel".to_string());
        assert_eq!(held.await, Some("eiffel".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_keystroke_invalidates_pending_query() {
        let debouncer = QueryDebouncer::default();

        let stale = debouncer.submit("eiff".to_string());
        let fresh = debouncer.submit("eiffel".to_string());

        assert_eq!(stale.await, None);
        assert_eq!(fresh.await, Some("eiffel".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_queries_both_run() {
        let debouncer = QueryDebouncer::new(Duration::from_millis(200));

        assert_eq!(
            debouncer.submit("paris".to_string()).await,
            Some("paris".to_string())
        );
        assert_eq!(
            debouncer.submit("agra".to_string()).await,
            Some("agra".to_string())
        );
    }
}
