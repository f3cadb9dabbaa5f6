//! Time-expiring memoization for a single fallible query
//!
//! Wraps one fetch function behind a mutex and an expiry window: calls
//! within the window return the stored result without re-running the
//! fetch. Both values and errors are cached for the window, so a failing
//! backend is not hammered by every caller. Unrelated to the chat room;
//! this is the repository's standalone query utility.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A mutex-guarded, time-expiring cache around one query
///
/// `T` and `E` must be `Clone` because every hit hands out a copy of the
/// stored result.
pub struct CachedQuery<T, E, F> {
    expire: Duration,
    state: Mutex<State<T, E, F>>,
}

struct State<T, E, F> {
    fetch: F,
    cached: Option<Cached<T, E>>,
}

struct Cached<T, E> {
    refreshed_at: Instant,
    result: Result<T, E>,
}

impl<T, E, F> CachedQuery<T, E, F>
where
    T: Clone,
    E: Clone,
    F: FnMut() -> Result<T, E>,
{
    /// Wrap `fetch`, considering its result fresh for `expire`
    pub fn new(expire: Duration, fetch: F) -> Self {
        Self {
            expire,
            state: Mutex::new(State {
                fetch,
                cached: None,
            }),
        }
    }

    /// Return the cached result, re-running the fetch if it has expired.
    ///
    /// Concurrent callers serialize on the internal mutex, so the fetch
    /// runs at most once per expiry window however many callers there are.
    pub fn query(&self) -> Result<T, E> {
        let now = Instant::now();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = &state.cached {
            if cached.refreshed_at + self.expire > now {
                return cached.result.clone();
            }
        }

        let result = (state.fetch)();
        state.cached = Some(Cached {
            refreshed_at: Instant::now(),
            result: result.clone(),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_hit_within_window_does_not_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = CachedQuery::new(Duration::from_secs(60), move || {
            Ok::<usize, String>(counter.fetch_add(1, Ordering::SeqCst))
        });

        assert_eq!(cache.query(), Ok(0));
        assert_eq!(cache.query(), Ok(0));
        assert_eq!(cache.query(), Ok(0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_expired_entry_refetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = CachedQuery::new(Duration::from_millis(20), move || {
            Ok::<usize, String>(counter.fetch_add(1, Ordering::SeqCst))
        });

        assert_eq!(cache.query(), Ok(0));
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.query(), Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_errors_are_cached_for_the_window() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = CachedQuery::new(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<usize, String>("backend down".to_string())
        });

        assert_eq!(cache.query(), Err("backend down".to_string()));
        assert_eq!(cache.query(), Err("backend down".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
