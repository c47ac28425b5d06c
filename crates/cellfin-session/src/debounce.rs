//! # Input Debouncing
//!
//! Collapses a burst of keystrokes into one recomputation.
//!
//! ## Coalescing Timeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  keystroke   "1"      "10"     "100"                                    │
//! │  call()       │        │        │                                       │
//! │  generation   1        2        3                                       │
//! │               ├─ wait ─┼─ wait ─┼──── window ────┐                      │
//! │               ▼        ▼        │                ▼                      │
//! │             None     None       │          handler("100") → Some(T)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `call` bumps a shared generation counter and spawns a task that
//! sleeps for the window. When it wakes, the task only runs the handler if
//! no newer call has bumped the counter in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Default quiet period before a recompute (ms).
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// A handler that only runs for the last call in a burst.
///
/// Clones share the same generation counter, so a call through any clone
/// supersedes pending calls made through the others.
#[derive(Debug)]
pub struct Debounced<F> {
    window: Duration,
    generation: Arc<AtomicU64>,
    handler: Arc<F>,
}

impl<F> Clone for Debounced<F> {
    fn clone(&self) -> Self {
        Debounced {
            window: self.window,
            generation: Arc::clone(&self.generation),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<F> Debounced<F> {
    /// Wraps `handler` with the given quiet window.
    pub fn new(window: Duration, handler: F) -> Self {
        Debounced {
            window,
            generation: Arc::new(AtomicU64::new(0)),
            handler: Arc::new(handler),
        }
    }

    /// Wraps `handler` with the default 100ms window.
    pub fn with_default_window(handler: F) -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS), handler)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules the handler after the window.
    ///
    /// The returned handle resolves to `None` if a newer call superseded
    /// this one before the window elapsed. Must be called inside a tokio
    /// runtime.
    ///
    /// ## Example
    /// ```rust
    /// use std::time::Duration;
    /// use cellfin_session::Debounced;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let debounced = Debounced::new(Duration::from_millis(5), |text: String| text.len());
    ///
    /// let first = debounced.call("1".to_string());
    /// let last = debounced.call("100".to_string());
    ///
    /// assert_eq!(first.await.unwrap(), None);
    /// assert_eq!(last.await.unwrap(), Some(3));
    /// # }
    /// ```
    pub fn call<A, T>(&self, arg: A) -> JoinHandle<Option<T>>
    where
        F: Fn(A) -> T + Send + Sync + 'static,
        A: Send + 'static,
        T: Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let handler = Arc::clone(&self.handler);
        let window = self.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;

            let latest = generation.load(Ordering::SeqCst);
            if latest != ticket {
                debug!(ticket, latest, "Debounced call superseded");
                return None;
            }

            Some(handler(arg))
        })
    }

    /// Runs the handler immediately, cancelling any pending call.
    pub fn call_now<A, T>(&self, arg: A) -> T
    where
        F: Fn(A) -> T,
    {
        self.generation.fetch_add(1, Ordering::SeqCst);
        (self.handler)(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::Instant;

    fn counting_handler() -> (Arc<AtomicUsize>, impl Fn(u32) -> u32 + Send + Sync + 'static) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let handler = move |value: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            value * 2
        };
        (runs, handler)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_call() {
        let (runs, handler) = counting_handler();
        let debounced = Debounced::new(Duration::from_millis(100), handler);

        let first = debounced.call(1);
        let second = debounced.call(2);
        let third = debounced.call(3);

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.await.unwrap(), None);
        assert_eq!(third.await.unwrap(), Some(6));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_window() {
        let debounced = Debounced::with_default_window(|value: u32| value);
        let start = Instant::now();

        assert_eq!(debounced.call(7).await.unwrap(), Some(7));
        assert!(start.elapsed() >= Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_both_run() {
        let (runs, handler) = counting_handler();
        let debounced = Debounced::new(Duration::from_millis(50), handler);

        assert_eq!(debounced.call(1).await.unwrap(), Some(2));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(debounced.call(2).await.unwrap(), Some(4));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_now_cancels_pending() {
        let (runs, handler) = counting_handler();
        let debounced = Debounced::new(Duration::from_millis(100), handler);

        let pending = debounced.call(1);
        assert_eq!(debounced.call_now(5), 10);

        assert_eq!(pending.await.unwrap(), None);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_generation() {
        let debounced = Debounced::new(Duration::from_millis(100), |value: u32| value);
        let other = debounced.clone();

        let pending = debounced.call(1);
        let latest = other.call(2);

        assert_eq!(pending.await.unwrap(), None);
        assert_eq!(latest.await.unwrap(), Some(2));
    }
}
