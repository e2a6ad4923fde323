//! A fetch operation bound to one tracked line's station, direction, and filter.

use std::sync::Arc;

use chrono::Utc;

use crate::identifiers::StationIdentifier;
use crate::models::{Direction, LineSnapshot, Result, TripFilter};
use crate::network::traits::ArrivalSource;

/// Built once per tracked line at startup and owned by it for the process lifetime.
pub struct LineFetcher {
    source: Arc<dyn ArrivalSource>,
    filter: TripFilter,
    direction: Direction,
    station: StationIdentifier,
}

impl LineFetcher {
    pub fn new(
        source: Arc<dyn ArrivalSource>,
        filter: TripFilter,
        direction: Direction,
        station: StationIdentifier,
    ) -> Self {
        Self {
            source,
            filter,
            direction,
            station,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn station(&self) -> &StationIdentifier {
        &self.station
    }

    pub async fn fetch(&self) -> Result<LineSnapshot> {
        let trips = self
            .source
            .upcoming_trips(&self.station, self.direction)
            .await?;

        tracing::debug!(
            station = %self.station,
            direction = %self.direction,
            trips = trips.len(),
            "fetched upcoming trips"
        );

        Ok(LineSnapshot::from_trips(
            self.direction,
            &trips,
            &self.filter,
            Utc::now(),
        ))
    }
}
