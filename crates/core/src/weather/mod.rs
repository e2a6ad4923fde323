//! Weather overlay: a coarse precipitation classification shown as a display effect.

pub mod openweather;
pub mod tracker;

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};

pub use openweather::OpenWeatherClient;
pub use tracker::WeatherTracker;

/// Below this peak intensity (mm/h) nothing is shown.
pub const PRECIPITATION_THRESHOLD: f64 = 0.5;
pub const RAIN_THRESHOLD: f64 = 2.5;
pub const STORM_THRESHOLD: f64 = 8.0;
/// How many hourly buckets are checked for snow
pub const SNOW_LOOKAHEAD_HOURS: usize = 2;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WeatherEffect {
    #[default]
    None,
    Drizzle,
    Rain,
    Storm,
    Snow,
}

impl WeatherEffect {
    pub fn is_none(&self) -> bool {
        *self == Self::None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HourlyPrecipitation {
    /// Rain accumulation over the hour, mm
    pub rain: f64,
    /// Snow accumulation over the hour, mm
    pub snow: f64,
}

/// Short-range forecast: minute-level intensities for the next hour plus hourly buckets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecipitationForecast {
    pub minutely: Vec<f64>,
    pub hourly: Vec<HourlyPrecipitation>,
}

impl PrecipitationForecast {
    pub fn max_intensity(&self) -> f64 {
        self.minutely.iter().copied().fold(0.0, f64::max)
    }

    pub fn snow_dominant(&self) -> bool {
        self.hourly
            .iter()
            .take(SNOW_LOOKAHEAD_HOURS)
            .any(|hour| hour.snow > hour.rain)
    }

    pub fn classify(&self) -> WeatherEffect {
        let max = self.max_intensity();

        if max < PRECIPITATION_THRESHOLD {
            WeatherEffect::None
        } else if self.snow_dominant() {
            WeatherEffect::Snow
        } else if max > STORM_THRESHOLD {
            WeatherEffect::Storm
        } else if max > RAIN_THRESHOLD {
            WeatherEffect::Rain
        } else {
            WeatherEffect::Drizzle
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather API returned {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Invalid weather API URL: {0}")]
    InvalidUrl(String),
}

/// Fetch a precipitation forecast for a location
pub trait WeatherSource: Send + Sync {
    fn precipitation_forecast<'a>(
        &'a self,
        location: geo::Point,
    ) -> Pin<Box<dyn Future<Output = Result<PrecipitationForecast, WeatherError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(max: f64, hourly: &[(f64, f64)]) -> PrecipitationForecast {
        PrecipitationForecast {
            minutely: vec![0.0, max / 2.0, max, 0.1],
            hourly: hourly
                .iter()
                .map(|&(rain, snow)| HourlyPrecipitation { rain, snow })
                .collect(),
        }
    }

    #[test]
    fn test_classify_thresholds() {
        let dry_hours = [(1.0, 0.0), (1.0, 0.0)];

        assert_eq!(forecast(0.3, &dry_hours).classify(), WeatherEffect::None);
        assert_eq!(forecast(1.0, &dry_hours).classify(), WeatherEffect::Drizzle);
        assert_eq!(forecast(2.5, &dry_hours).classify(), WeatherEffect::Drizzle);
        assert_eq!(forecast(3.0, &dry_hours).classify(), WeatherEffect::Rain);
        assert_eq!(forecast(8.0, &dry_hours).classify(), WeatherEffect::Rain);
        assert_eq!(forecast(9.0, &dry_hours).classify(), WeatherEffect::Storm);
    }

    #[test]
    fn test_lower_threshold_is_inclusive() {
        assert_eq!(forecast(0.5, &[]).classify(), WeatherEffect::Drizzle);
        assert_eq!(forecast(0.49, &[]).classify(), WeatherEffect::None);
    }

    #[test]
    fn test_snow_beats_intensity() {
        assert_eq!(
            forecast(0.5, &[(0.0, 0.2), (0.0, 0.0)]).classify(),
            WeatherEffect::Snow
        );
        assert_eq!(
            forecast(9.0, &[(1.0, 0.5), (0.2, 0.4)]).classify(),
            WeatherEffect::Snow
        );
        // Snow-dominant hour but too little precipitation right now
        assert_eq!(
            forecast(0.3, &[(0.0, 3.0)]).classify(),
            WeatherEffect::None
        );
    }

    #[test]
    fn test_snow_only_checks_next_two_hours() {
        assert_eq!(
            forecast(3.0, &[(1.0, 0.0), (1.0, 0.0), (0.0, 5.0)]).classify(),
            WeatherEffect::Rain
        );
        // Equal accumulation is not snow-dominant
        assert_eq!(
            forecast(3.0, &[(1.0, 1.0)]).classify(),
            WeatherEffect::Rain
        );
    }

    #[test]
    fn test_empty_forecast() {
        assert_eq!(PrecipitationForecast::default().classify(), WeatherEffect::None);
    }

    #[test]
    fn test_effect_names() {
        assert_eq!(WeatherEffect::Rain.to_string(), "rain");
        assert_eq!(<&'static str>::from(WeatherEffect::Snow), "snow");
        assert_eq!("storm".parse::<WeatherEffect>().unwrap(), WeatherEffect::Storm);
        assert_eq!(
            serde_json::to_string(&WeatherEffect::Drizzle).unwrap(),
            "\"drizzle\""
        );
        assert!(WeatherEffect::default().is_none());
    }
}
