use std::sync::Arc;
use std::time::Duration;

use subway_time_core::TrackedLine;
use subway_time_core::sprite::{Sprite, atlas};
use subway_time_transit::{ArrivalSource, Direction, LineFetcher, StationIdentifier, TripFilter};

/// Static description of one line shown on the display.
pub struct LineConfig {
    pub id: &'static str,
    pub routes: &'static [&'static str],
    /// Trains closer than this cannot be caught from home
    pub min_lead_minutes: i64,
    pub direction: Direction,
    pub station: &'static str,
    pub badge: &'static Sprite,
}

pub const TRACKED_LINES: &[LineConfig] = &[
    LineConfig {
        id: "r_dekalb_north",
        routes: &["R"],
        min_lead_minutes: 2,
        direction: Direction::North,
        station: "R30",
        badge: &atlas::R_BULLET,
    },
    LineConfig {
        id: "45_nevins_north",
        routes: &["4", "5"],
        min_lead_minutes: 4,
        direction: Direction::North,
        station: "234",
        badge: &atlas::FOUR_FIVE_BULLET,
    },
];

impl LineConfig {
    pub fn build(&self, source: Arc<dyn ArrivalSource>, ttl: Duration) -> TrackedLine {
        let filter = TripFilter::new(
            chrono::Duration::minutes(self.min_lead_minutes),
            self.routes.iter().copied(),
        );
        let fetcher = LineFetcher::new(
            source,
            filter,
            self.direction,
            StationIdentifier::new(self.station),
        );

        TrackedLine::new(self.id, self.badge, fetcher, ttl)
    }
}

pub fn tracked_lines(source: Arc<dyn ArrivalSource>, ttl: Duration) -> Vec<TrackedLine> {
    TRACKED_LINES
        .iter()
        .map(|line| line.build(source.clone(), ttl))
        .collect()
}
