//! Polls subway arrivals and the weather, and publishes them to an AWTRIX
//! display as custom apps over MQTT.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use subway_time_core::weather::{OpenWeatherClient, openweather};
use subway_time_core::{PollLoop, TrackedLine, WeatherTracker, poll};
use subway_time_transit::SubwayNowClient;
use subway_time_transit::provider::subway_now;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod lines;
mod mqtt;

use config::BrokerEndpoint;
use mqtt::MqttPublisher;

#[derive(Parser, Debug)]
#[command(author, version, about = "Subway arrival times on an AWTRIX LED matrix")]
struct Args {
    /// MQTT broker, e.g. tcp://192.168.1.198:1883
    #[arg(long, env = "MQTT_ENDPOINT")]
    mqtt_endpoint: BrokerEndpoint,

    /// Topic prefix of the display, e.g. awtrix_420508
    #[arg(long, env = "MQTT_AWTRIX_PREFIX")]
    mqtt_awtrix_prefix: String,

    #[arg(long, env = "MQTT_USERNAME")]
    mqtt_username: String,

    #[arg(long, env = "MQTT_PASSWORD", hide_env_values = true)]
    mqtt_password: String,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHERMAP_KEY", hide_env_values = true)]
    openweathermap_key: String,

    /// Seconds between display updates
    #[arg(long, default_value_t = poll::DEFAULT_PERIOD.as_secs())]
    poll_period: u64,

    /// Seconds arrivals for a line are reused before querying again
    #[arg(long, default_value_t = TrackedLine::CACHE_TTL.as_secs())]
    line_ttl: u64,

    /// Seconds the weather effect is reused before querying again
    #[arg(long, default_value_t = WeatherTracker::CACHE_TTL.as_secs())]
    weather_ttl: u64,

    #[arg(long, default_value_t = 40.69888, allow_negative_numbers = true)]
    weather_latitude: f64,

    #[arg(long, default_value_t = -73.992659, allow_negative_numbers = true)]
    weather_longitude: f64,

    /// Timeout for every upstream HTTP request, in seconds
    #[arg(long, default_value_t = 10)]
    http_timeout: u64,

    #[arg(long, default_value = subway_now::DEFAULT_BASE_URL)]
    subway_now_url: String,

    #[arg(long, default_value = openweather::DEFAULT_BASE_URL)]
    openweather_url: String,

    /// Tracing filter directives; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_filter))
        .wrap_err("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let http_timeout = Duration::from_secs(args.http_timeout);

    let transit = SubwayNowClient::new(&args.subway_now_url, http_timeout)
        .wrap_err("failed to build SubwayNow client")?;
    let weather_source =
        OpenWeatherClient::new(&args.openweather_url, args.openweathermap_key, http_timeout)
            .wrap_err("failed to build OpenWeatherMap client")?;

    let location = geo::Point::new(args.weather_longitude, args.weather_latitude);
    let weather = WeatherTracker::new(
        Arc::new(weather_source),
        location,
        Duration::from_secs(args.weather_ttl),
    );

    let tracked = lines::tracked_lines(Arc::new(transit), Duration::from_secs(args.line_ttl));

    let publisher = MqttPublisher::connect(
        &args.mqtt_endpoint,
        &args.mqtt_username,
        &args.mqtt_password,
    )
    .await
    .wrap_err_with(|| format!("failed to connect to MQTT broker {}", args.mqtt_endpoint))?;
    info!(endpoint = %args.mqtt_endpoint, "connected to MQTT broker");

    let poll_loop = PollLoop::new(
        tracked,
        Arc::new(weather),
        Arc::new(publisher),
        args.mqtt_awtrix_prefix,
        Duration::from_secs(args.poll_period),
    );

    tokio::select! {
        () = poll_loop.run() => {}
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("received ctrl-c, shutting down"),
                Err(error) => warn!(%error, "failed to listen for ctrl-c, shutting down"),
            }
        }
    }

    Ok(())
}
