//! Wire format for the display's custom-app MQTT topic.
//!
//! A payload looks like:
//!
//! ```json
//! {
//!   "draw": [{"db": [0, 0, 32, 8, [16777215, 0, ...]]}],
//!   "lifetime": 60,
//!   "duration": 4,
//!   "noScroll": true,
//!   "text": "N/A...",
//!   "topText": true,
//!   "textCase": 2,
//!   "textOffset": 12,
//!   "center": false,
//!   "overlay": "rain"
//! }
//! ```
//!
//! The text fields and `overlay` are only present when there is something to show.

use serde::Serialize;

use crate::render::Frame;
use crate::sprite::pack_rgb;
use crate::weather::WeatherEffect;

/// Seconds the display keeps the app after the last update
pub const LIFETIME_SECS: u32 = 60;
/// Seconds the app stays on screen per rotation
pub const DURATION_SECS: u32 = 4;
/// Leaves room for the badge to the left of the text
pub const TEXT_OFFSET: u32 = 12;
pub const TEXT_CASE: u8 = 2;

/// `[x, y, width, height, pixels]`
#[derive(Debug, Serialize)]
pub struct DrawCommand {
    db: (u32, u32, u32, u32, Vec<u32>),
}

impl DrawCommand {
    pub fn bitmap(frame: &Frame) -> Self {
        Self {
            db: (
                0,
                0,
                Frame::WIDTH as u32,
                Frame::HEIGHT as u32,
                flatten(frame),
            ),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextFields<'a> {
    text: &'a str,
    top_text: bool,
    text_case: u8,
    text_offset: u32,
    center: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPayload<'a> {
    draw: [DrawCommand; 1],
    lifetime: u32,
    duration: u32,
    no_scroll: bool,
    #[serde(flatten)]
    text: Option<TextFields<'a>>,
    #[serde(skip_serializing_if = "WeatherEffect::is_none")]
    overlay: WeatherEffect,
}

impl<'a> DisplayPayload<'a> {
    pub fn new(frame: &Frame, text: &'a str, overlay: WeatherEffect) -> Self {
        let text = (!text.is_empty()).then_some(TextFields {
            text,
            top_text: true,
            text_case: TEXT_CASE,
            text_offset: TEXT_OFFSET,
            center: false,
        });

        Self {
            draw: [DrawCommand::bitmap(frame)],
            lifetime: LIFETIME_SECS,
            duration: DURATION_SECS,
            no_scroll: true,
            text,
            overlay,
        }
    }
}

/// Row-major `0xRRGGBB` values; unset pixels are black.
pub fn flatten(frame: &Frame) -> Vec<u32> {
    frame
        .rows()
        .flatten()
        .map(|pixel| pixel.map_or(0, pack_rgb))
        .collect()
}

pub fn encode(frame: &Frame, text: &str, overlay: WeatherEffect) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&DisplayPayload::new(frame, text, overlay))
}
