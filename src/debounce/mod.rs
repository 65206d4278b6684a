//! Trailing-edge debounce primitive.
//!
//! Coalesces rapid repeated trigger events into a single delayed effect:
//! for a burst of triggers spaced closer than the delay, exactly one
//! effect invocation occurs, using the value from the last trigger. Used
//! to turn raw keystroke events into a single downstream search dispatch.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default quiet period for search input, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// A trailing-edge debouncer.
///
/// Each [`trigger`](Self::trigger) cancels any previously scheduled,
/// not-yet-executed effect and schedules the effect to run after the
/// configured delay elapses with no further triggers.
pub struct Debouncer<T> {
    delay: Duration,
    effect: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer that invokes `effect` after `delay` of quiet.
    pub fn new(delay: Duration, effect: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            effect: Arc::new(effect),
            pending: Mutex::new(None),
        }
    }

    /// Creates a debouncer with the standard search quiet period.
    pub fn for_search(effect: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS), effect)
    }

    /// Schedules the effect with `value`, superseding any pending trigger.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self, value: T) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let effect = Arc::clone(&self.effect);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            effect(value);
        }));
    }

    /// Cancels any pending effect without scheduling a new one.
    pub fn cancel(&self) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
