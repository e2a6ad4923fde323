//! Core data types and enums for arrival data.

use chrono::{DateTime, Duration, Utc};

use crate::identifiers::*;
use crate::models::filter::TripFilter;

// ============================================================================
// Enums
// ============================================================================

/// Platform direction at a station, as reported by the arrivals feed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A raw upcoming trip at a station, before any line filtering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripRecord {
    pub trip_id: TripIdentifier,
    pub route_id: RouteIdentifier,
    /// Estimated arrival at the queried station
    pub arrival: DateTime<Utc>,
    pub delay: Duration,
    /// Whether a train has been assigned to the trip (realtime vs. scheduled)
    pub assigned: bool,
    pub destination: Option<StationIdentifier>,
}

/// One upcoming arrival, as shown on the display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivalEstimate {
    pub delay: Duration,
    pub realtime: bool,
    pub arrival_time: DateTime<Utc>,
}

impl From<&TripRecord> for ArrivalEstimate {
    fn from(trip: &TripRecord) -> Self {
        Self {
            delay: trip.delay,
            realtime: trip.assigned,
            arrival_time: trip.arrival,
        }
    }
}

/// The best-known upcoming arrivals for one tracked line.
///
/// Holds at most [`LineSnapshot::MAX_ARRIVALS`] entries, soonest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSnapshot {
    direction: Direction,
    arrivals: Vec<ArrivalEstimate>,
}

impl LineSnapshot {
    pub const MAX_ARRIVALS: usize = 2;

    pub fn new(direction: Direction, arrivals: impl IntoIterator<Item = ArrivalEstimate>) -> Self {
        Self {
            direction,
            arrivals: arrivals.into_iter().take(Self::MAX_ARRIVALS).collect(),
        }
    }

    pub fn empty(direction: Direction) -> Self {
        Self::new(direction, std::iter::empty())
    }

    /// Select the trips matching `filter` as of `now` and keep the soonest two.
    ///
    /// The sort is stable, so trips the feed reports with equal arrival times
    /// keep their upstream order.
    pub fn from_trips<'a>(
        direction: Direction,
        trips: impl IntoIterator<Item = &'a TripRecord>,
        filter: &TripFilter,
        now: DateTime<Utc>,
    ) -> Self {
        let mut matching: Vec<&TripRecord> = trips
            .into_iter()
            .filter(|trip| filter.matches(trip, now))
            .collect();
        matching.sort_by_key(|trip| trip.arrival);

        Self::new(direction, matching.into_iter().map(ArrivalEstimate::from))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn arrivals(&self) -> &[ArrivalEstimate] {
        &self.arrivals
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Arrivals API returned {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Station not found: {0}")]
    StationNotFound(StationIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
