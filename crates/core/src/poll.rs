//! The periodic fetch → render → encode → publish pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::line::TrackedLine;
use crate::payload;
use crate::publish::{PublishError, Publisher};
use crate::render;
use crate::transit::TransitError;
use crate::weather::WeatherTracker;

/// Shown when a line has no upcoming arrivals
pub const PLACEHOLDER_TEXT: &str = "N/A...";
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("Fetching arrivals failed: {0}")]
    Fetch(#[from] TransitError),

    #[error("Encoding payload failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub struct PollLoop {
    lines: Vec<TrackedLine>,
    weather: Arc<WeatherTracker>,
    publisher: Arc<dyn Publisher>,
    topic_prefix: String,
    period: Duration,
}

impl PollLoop {
    pub fn new(
        lines: Vec<TrackedLine>,
        weather: Arc<WeatherTracker>,
        publisher: Arc<dyn Publisher>,
        topic_prefix: impl Into<String>,
        period: Duration,
    ) -> Self {
        Self {
            lines,
            weather,
            publisher,
            topic_prefix: topic_prefix.into(),
            period,
        }
    }

    /// Runs forever. The first tick fires immediately.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            lines = self.lines.len(),
            period = ?self.period,
            "starting poll loop"
        );

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// Process every line once. A failing line never stops the others.
    pub async fn tick(&mut self) {
        for line in &mut self.lines {
            if let Err(error) = process_line(
                line,
                &self.weather,
                self.publisher.as_ref(),
                &self.topic_prefix,
            )
            .await
            {
                warn!(line = %line.id(), %error, "error updating line");
            }
        }
    }
}

async fn process_line(
    line: &mut TrackedLine,
    weather: &WeatherTracker,
    publisher: &dyn Publisher,
    topic_prefix: &str,
) -> Result<(), LineError> {
    let snapshot = line.fetch().await?;
    let rendered = render::render(&snapshot, line.badge(), Utc::now());

    let text = if snapshot.is_empty() {
        PLACEHOLDER_TEXT
    } else {
        ""
    };

    let overlay = weather.current_effect().await;
    let body = payload::encode(&rendered.frame, text, overlay)?;
    let topic = line.topic(topic_prefix);

    debug!(%topic, arrivals = %rendered.text, %overlay, "publishing line");
    publisher.publish(&topic, body).await?;

    Ok(())
}
