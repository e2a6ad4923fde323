use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::FreshnessCache;
use crate::weather::{WeatherEffect, WeatherError, WeatherSource};

/// The single weather effect shared by every tracked line.
///
/// The lock is held across the refresh, so concurrent callers wait for one
/// upstream query instead of issuing their own.
pub struct WeatherTracker {
    source: Arc<dyn WeatherSource>,
    location: geo::Point,
    cache: Mutex<FreshnessCache<WeatherEffect>>,
}

impl WeatherTracker {
    pub const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

    pub fn new(source: Arc<dyn WeatherSource>, location: geo::Point, ttl: Duration) -> Self {
        Self {
            source,
            location,
            cache: Mutex::new(FreshnessCache::new(ttl)),
        }
    }

    /// Never fails: upstream errors fall back to the last known effect.
    pub async fn current_effect(&self) -> WeatherEffect {
        let mut cache = self.cache.lock().await;

        let refresh = move || async move {
            let forecast = self.source.precipitation_forecast(self.location).await?;
            let effect = forecast.classify();
            info!(%effect, max_intensity = forecast.max_intensity(), "got weather");
            Ok::<_, WeatherError>(effect)
        };

        match cache.get_or_refresh(refresh).await {
            Ok(effect) => *effect,
            Err(error) => {
                warn!(%error, "error querying weather");
                cache.last().map_or(WeatherEffect::None, |effect| *effect)
            }
        }
    }
}
