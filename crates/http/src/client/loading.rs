//! Global loading indicator
//!
//! A reference count over in-flight requests, not a boolean: with
//! overlapping requests a boolean toggle desynchronizes the moment an
//! earlier request finishes while a later one is still out. The indicator
//! is `true` iff at least one tracked request is outstanding.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

struct LoadingState {
    in_flight: AtomicUsize,
    signal: watch::Sender<bool>,
}

/// Reference-counted in-flight request tracker.
pub struct LoadingTracker {
    state: Arc<LoadingState>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            state: Arc::new(LoadingState {
                in_flight: AtomicUsize::new(0),
                signal,
            }),
        }
    }

    /// Track one request. The indicator stays `true` until the returned
    /// guard drops, which happens exactly once per request regardless of
    /// which path (success, refresh-retry, terminal failure) settles it.
    pub fn start(&self) -> LoadingGuard {
        if self.state.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.state.signal.send_replace(true);
        }
        LoadingGuard {
            state: Arc::clone(&self.state),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn in_flight(&self) -> usize {
        self.state.in_flight.load(Ordering::SeqCst)
    }

    /// Observe indicator transitions. Only 0↔1 edges are signalled.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.signal.subscribe()
    }
}

impl Default for LoadingTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII handle for one tracked request.
pub struct LoadingGuard {
    state: Arc<LoadingState>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.state.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.state.signal.send_replace(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_tracks_a_single_request() {
        let tracker = LoadingTracker::new();
        assert!(!tracker.is_loading());
        let guard = tracker.start();
        assert!(tracker.is_loading());
        drop(guard);
        assert!(!tracker.is_loading());
    }

    #[test]
    fn overlapping_guards_keep_the_indicator_true() {
        let tracker = LoadingTracker::new();

        // ABAB and ABBA orders both keep the indicator true until the last
        // guard drops.
        let a = tracker.start();
        let b = tracker.start();
        drop(a);
        assert!(tracker.is_loading());
        drop(b);
        assert!(!tracker.is_loading());

        let a = tracker.start();
        let b = tracker.start();
        drop(b);
        assert!(tracker.is_loading());
        drop(a);
        assert!(!tracker.is_loading());
    }

    #[test]
    fn interleavings_match_the_outstanding_count() {
        // Seeded LCG walk over start/stop interleavings: after every step
        // the indicator must equal "outstanding > 0".
        let mut rng: u64 = 0x5EED;
        let mut next = move || {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            rng >> 33
        };

        let tracker = LoadingTracker::new();
        let mut guards = Vec::new();

        for _ in 0..500 {
            if guards.is_empty() || next() % 2 == 0 {
                guards.push(tracker.start());
            } else {
                guards.swap_remove(next() as usize % guards.len());
            }
            assert_eq!(tracker.in_flight(), guards.len());
            assert_eq!(tracker.is_loading(), !guards.is_empty());
        }

        guards.clear();
        assert!(!tracker.is_loading());
    }

    #[test]
    fn subscribers_see_only_edge_transitions() {
        let tracker = LoadingTracker::new();
        let mut receiver = tracker.subscribe();

        let a = tracker.start();
        assert!(receiver.has_changed().unwrap());
        assert!(*receiver.borrow_and_update());

        // A second overlapping request is not a new edge.
        let b = tracker.start();
        assert!(!receiver.has_changed().unwrap());

        drop(a);
        assert!(!receiver.has_changed().unwrap());
        drop(b);
        assert!(receiver.has_changed().unwrap());
        assert!(!*receiver.borrow_and_update());
    }
}
