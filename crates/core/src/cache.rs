//! Time-to-live cache around a single fallible refresh.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

struct CacheEntry<T> {
    fetched_at: Instant,
    value: Arc<T>,
}

/// Holds the last successfully fetched value and when it was fetched.
///
/// Failed refreshes leave the entry alone, so the next call retries upstream
/// straight away.
pub struct FreshnessCache<T> {
    ttl: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T> FreshnessCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if it is younger than the TTL.
    pub fn fresh(&self) -> Option<Arc<T>> {
        self.entry
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// The last successfully fetched value, however old.
    pub fn last(&self) -> Option<Arc<T>> {
        self.entry.as_ref().map(|entry| entry.value.clone())
    }

    pub async fn get_or_refresh<F, Fut, E>(&mut self, refresh: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.fresh() {
            return Ok(value);
        }

        let value = Arc::new(refresh().await?);
        self.entry = Some(CacheEntry {
            fetched_at: Instant::now(),
            value: value.clone(),
        });

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let mut cache = FreshnessCache::new(TTL);
        let calls = &AtomicUsize::new(0);
        let refresh = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>("snapshot")
        };

        let first = cache.get_or_refresh(refresh).await.unwrap();
        tokio::time::advance(Duration::from_secs(59)).await;
        let second = cache.get_or_refresh(refresh).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_after_ttl() {
        let mut cache = FreshnessCache::new(TTL);
        let calls = &AtomicUsize::new(0);
        let refresh = move || async move { Ok::<_, ()>(calls.fetch_add(1, Ordering::SeqCst)) };

        let first = cache.get_or_refresh(refresh).await.unwrap();
        tokio::time::advance(TTL).await;
        let second = cache.get_or_refresh(refresh).await.unwrap();
        let third = cache.get_or_refresh(refresh).await.unwrap();

        assert_eq!((*first, *second), (0, 1));
        assert!(Arc::ptr_eq(&second, &third));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_not_cached() {
        let mut cache = FreshnessCache::<u32>::new(TTL);
        let calls = &AtomicUsize::new(0);

        let failing = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>("upstream down")
        };
        assert_eq!(cache.get_or_refresh(failing).await, Err("upstream down"));
        assert_eq!(cache.get_or_refresh(failing).await, Err("upstream down"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.last().is_none());

        let value = cache.get_or_refresh(|| async { Ok::<_, &str>(7) }).await.unwrap();
        assert_eq!(*value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_stale_value() {
        let mut cache = FreshnessCache::new(TTL);
        cache.get_or_refresh(|| async { Ok::<_, ()>(1) }).await.unwrap();

        tokio::time::advance(TTL * 2).await;
        assert!(cache.fresh().is_none());
        assert!(cache.get_or_refresh(|| async { Err(()) }).await.is_err());

        // Still stale, still the old value
        assert!(cache.fresh().is_none());
        assert_eq!(cache.last().as_deref(), Some(&1));
    }
}
