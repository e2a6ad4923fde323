//! OpenWeatherMap One Call client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::weather::{HourlyPrecipitation, PrecipitationForecast, WeatherError, WeatherSource};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

// Sections of the response the forecast never looks at
const EXCLUDE: &str = "current,daily,alerts";

pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let base_url =
            Url::parse(base_url).map_err(|error| WeatherError::InvalidUrl(error.to_string()))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("subway-time/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn request_url(&self, location: geo::Point) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &location.y().to_string())
            .append_pair("lon", &location.x().to_string())
            .append_pair("units", "metric")
            .append_pair("lang", "en")
            .append_pair("exclude", EXCLUDE)
            .append_pair("appid", &self.api_key);
        url
    }

    async fn one_call(&self, location: geo::Point) -> Result<OneCallResponse, WeatherError> {
        let response = self.client.get(self.request_url(location)).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(WeatherError::UnexpectedStatus(status)),
        }
    }
}

impl WeatherSource for OpenWeatherClient {
    fn precipitation_forecast<'a>(
        &'a self,
        location: geo::Point,
    ) -> Pin<Box<dyn Future<Output = Result<PrecipitationForecast, WeatherError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.one_call(location).await?.into()) })
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct OneCallResponse {
    #[serde(default)]
    minutely: Vec<MinutelyPoint>,
    #[serde(default)]
    hourly: Vec<HourlyPoint>,
}

#[derive(Debug, Deserialize)]
struct MinutelyPoint {
    #[serde(default)]
    precipitation: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyPoint {
    #[serde(default)]
    rain: Accumulation,
    #[serde(default)]
    snow: Accumulation,
}

#[derive(Debug, Default, Deserialize)]
struct Accumulation {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

impl From<OneCallResponse> for PrecipitationForecast {
    fn from(response: OneCallResponse) -> Self {
        Self {
            minutely: response
                .minutely
                .into_iter()
                .map(|point| point.precipitation)
                .collect(),
            hourly: response
                .hourly
                .into_iter()
                .map(|hour| HourlyPrecipitation {
                    rain: hour.rain.one_hour,
                    snow: hour.snow.one_hour,
                })
                .collect(),
        }
    }
}
