use std::sync::Arc;
use std::time::Duration;

use crate::cache::FreshnessCache;
use crate::sprite::Sprite;
use crate::transit::{Direction, LineFetcher, LineIdentifier, LineSnapshot, Result};

/// One line/direction/station combination shown on the display.
pub struct TrackedLine {
    id: LineIdentifier,
    badge: &'static Sprite,
    fetcher: LineFetcher,
    cache: FreshnessCache<LineSnapshot>,
}

impl TrackedLine {
    pub const CACHE_TTL: Duration = Duration::from_secs(60);

    pub fn new(
        id: impl Into<LineIdentifier>,
        badge: &'static Sprite,
        fetcher: LineFetcher,
        ttl: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            badge,
            fetcher,
            cache: FreshnessCache::new(ttl),
        }
    }

    pub fn id(&self) -> &LineIdentifier {
        &self.id
    }

    pub fn badge(&self) -> &'static Sprite {
        self.badge
    }

    pub fn direction(&self) -> Direction {
        self.fetcher.direction()
    }

    /// Upstream is called at most once per TTL; errors are not cached.
    pub async fn fetch(&mut self) -> Result<Arc<LineSnapshot>> {
        let fetcher = &self.fetcher;
        self.cache.get_or_refresh(|| fetcher.fetch()).await
    }

    pub fn topic(&self, prefix: &str) -> String {
        format!("{prefix}/custom/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{Duration as ChronoDuration, Utc};

    use super::*;
    use crate::sprite::atlas;
    use crate::transit::{
        ArrivalSource, RouteIdentifier, StationIdentifier, TransitError, TripFilter,
        TripIdentifier, TripRecord,
    };

    /// Succeeds on every call except those listed in `fail_on` (0-based)
    struct CountingSource {
        calls: AtomicUsize,
        fail_on: Vec<usize>,
    }

    impl ArrivalSource for CountingSource {
        fn upcoming_trips<'a>(
            &'a self,
            _station: &'a StationIdentifier,
            _direction: Direction,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<TripRecord>>> + Send + 'a>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail_on.contains(&call);

            Box::pin(async move {
                if fail {
                    return Err(TransitError::InvalidData("upstream unavailable".into()));
                }
                Ok(vec![TripRecord {
                    trip_id: TripIdentifier::new(format!("trip-{call}")),
                    route_id: RouteIdentifier::new("R"),
                    arrival: Utc::now() + ChronoDuration::minutes(8),
                    delay: ChronoDuration::zero(),
                    assigned: true,
                    destination: None,
                }])
            })
        }
    }

    fn line(source: Arc<CountingSource>) -> TrackedLine {
        let fetcher = LineFetcher::new(
            source,
            TripFilter::new(ChronoDuration::minutes(2), ["R"]),
            Direction::North,
            StationIdentifier::new("R30"),
        );
        TrackedLine::new("r_dekalb_north", &atlas::R_BULLET, fetcher, TrackedLine::CACHE_TTL)
    }

    fn source(fail_on: Vec<usize>) -> Arc<CountingSource> {
        Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_on,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_is_cached_for_ttl() {
        let source = source(vec![]);
        let mut line = line(source.clone());

        let first = line.fetch().await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        let second = line.fetch().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        let third = line.fetch().await.unwrap();

        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_retries_next_call() {
        let source = source(vec![0]);
        let mut line = line(source.clone());

        assert!(line.fetch().await.is_err());
        let snapshot = line.fetch().await.unwrap();

        assert_eq!(snapshot.arrivals().len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_expiry_is_not_masked() {
        let source = source(vec![1]);
        let mut line = line(source.clone());

        line.fetch().await.unwrap();
        tokio::time::advance(TrackedLine::CACHE_TTL).await;

        // Stale data is not served in place of an error
        assert!(line.fetch().await.is_err());
        assert!(line.fetch().await.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_topic() {
        let line = line(source(vec![]));
        assert_eq!(line.topic("awtrix_420508"), "awtrix_420508/custom/r_dekalb_north");
        assert_eq!(line.direction(), Direction::North);
    }
}
