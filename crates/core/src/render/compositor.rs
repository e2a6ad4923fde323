//! Turns a line snapshot into a finished frame.

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::render::frame::Frame;
use crate::sprite::{Sprite, atlas};
use crate::transit::{Direction, LineSnapshot};

pub const BADGE_ORIGIN: (usize, usize) = (2, 0);
pub const ARROW_ORIGIN: (usize, usize) = (0, 0);
/// Text starts just right of the badge
pub const TEXT_ORIGIN: (usize, usize) = (12, 0);
pub const GLYPH_SPACING: usize = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedLine {
    pub frame: Frame,
    /// Empty when the snapshot has no arrivals
    pub text: String,
}

/// Whole minutes until `arrival`, never negative.
pub fn minutes_until(arrival: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (arrival - now).num_minutes().max(0)
}

/// Always exactly two characters: the display has room for nothing more.
pub fn format_minutes(minutes: i64) -> String {
    format!("{:02}", minutes.clamp(0, 99))
}

pub fn arrival_text(snapshot: &LineSnapshot, now: DateTime<Utc>) -> String {
    snapshot
        .arrivals()
        .iter()
        .take(LineSnapshot::MAX_ARRIVALS)
        .map(|arrival| format_minutes(minutes_until(arrival.arrival_time, now)))
        .join(",")
}

pub fn direction_arrow(direction: Direction) -> &'static Sprite {
    match direction {
        Direction::North => &atlas::UP_ARROW,
        Direction::South => &atlas::DOWN_ARROW,
    }
}

pub fn render(snapshot: &LineSnapshot, badge: &Sprite, now: DateTime<Utc>) -> RenderedLine {
    let text = arrival_text(snapshot, now);
    let mut frame = Frame::new();

    frame.draw(badge, BADGE_ORIGIN.0, BADGE_ORIGIN.1);
    frame.draw(
        direction_arrow(snapshot.direction()),
        ARROW_ORIGIN.0,
        ARROW_ORIGIN.1,
    );

    let mut x = TEXT_ORIGIN.0;
    for ch in text.chars() {
        let Some(glyph) = atlas::glyph(ch) else {
            tracing::debug!(?ch, "no glyph for character, skipping");
            continue;
        };
        frame.draw(glyph, x, TEXT_ORIGIN.1);
        x += glyph.width() + GLYPH_SPACING;
    }

    RenderedLine { frame, text }
}
