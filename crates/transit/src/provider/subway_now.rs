//! HTTP client for the SubwayNow stop arrivals API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::DateTime;
use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::identifiers::*;
use crate::models::types::*;
use crate::network::traits::ArrivalSource;

pub const DEFAULT_BASE_URL: &str = "https://api.subwaynow.app";

// The API rejects requests that don't look like they came from its web client.
const ORIGIN: &str = "https://lite.subwaynow.app";

pub struct SubwayNowClient {
    client: reqwest::Client,
    base_url: String,
}

impl SubwayNowClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("subway-time/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn stop_url(&self, station: &StationIdentifier) -> String {
        format!("{}/stops/{}", self.base_url, station)
    }

    async fn fetch_stop(&self, station: &StationIdentifier) -> Result<StopResponse> {
        let response = self
            .client
            .get(self.stop_url(station))
            .header(header::ACCEPT, "*/*")
            .header(header::ORIGIN, ORIGIN)
            .header(header::REFERER, ORIGIN)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(TransitError::StationNotFound(station.clone())),
            status => Err(TransitError::UnexpectedStatus(status)),
        }
    }
}

impl ArrivalSource for SubwayNowClient {
    fn upcoming_trips<'a>(
        &'a self,
        station: &'a StationIdentifier,
        direction: Direction,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TripRecord>>> + Send + 'a>> {
        Box::pin(async move {
            let stop = self.fetch_stop(station).await?;
            stop.upcoming_trips.into_records(direction)
        })
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct StopResponse {
    #[serde(default)]
    upcoming_trips: UpcomingTrips,
}

#[derive(Debug, Default, Deserialize)]
struct UpcomingTrips {
    #[serde(default)]
    north: Vec<WireTrip>,
    #[serde(default)]
    south: Vec<WireTrip>,
}

impl UpcomingTrips {
    fn into_records(self, direction: Direction) -> Result<Vec<TripRecord>> {
        let trips = match direction {
            Direction::North => self.north,
            Direction::South => self.south,
        };

        trips.into_iter().map(TripRecord::try_from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct WireTrip {
    id: TripIdentifier,
    route_id: RouteIdentifier,
    /// Unix seconds
    estimated_current_stop_arrival_time: f64,
    #[serde(default)]
    delayed_time: f64,
    #[serde(default)]
    is_assigned: bool,
    #[serde(default)]
    destination_stop: Option<StationIdentifier>,
}

impl TryFrom<WireTrip> for TripRecord {
    type Error = TransitError;

    fn try_from(trip: WireTrip) -> Result<Self> {
        let arrival = DateTime::from_timestamp(trip.estimated_current_stop_arrival_time as i64, 0)
            .ok_or_else(|| {
                TransitError::InvalidData(format!(
                    "Arrival time {} for trip {} is out of range",
                    trip.estimated_current_stop_arrival_time, trip.id
                ))
            })?;

        let delay = chrono::Duration::try_seconds(trip.delayed_time as i64).ok_or_else(|| {
            TransitError::InvalidData(format!(
                "Delay {} for trip {} is out of range",
                trip.delayed_time, trip.id
            ))
        })?;

        Ok(Self {
            trip_id: trip.id,
            route_id: trip.route_id,
            arrival,
            delay,
            assigned: trip.is_assigned,
            destination: trip.destination_stop,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOP_JSON: &str = r#"{
        "id": "R30",
        "name": "DeKalb Av",
        "secondary_name": null,
        "upcoming_trips": {
            "north": [
                {
                    "id": "trip-1",
                    "route_id": "R",
                    "direction": "north",
                    "estimated_current_stop_arrival_time": 1700000300.0,
                    "delayed_time": 45.0,
                    "is_assigned": true,
                    "destination_stop": "R01"
                },
                {
                    "id": "trip-2",
                    "route_id": "Q",
                    "estimated_current_stop_arrival_time": 1700000400.7
                }
            ],
            "south": []
        },
        "timestamp": 1700000000
    }"#;

    #[test]
    fn test_decode_north_trips() {
        let stop: StopResponse = serde_json::from_str(STOP_JSON).unwrap();
        let trips = stop.upcoming_trips.into_records(Direction::North).unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].route_id, RouteIdentifier::new("R"));
        assert_eq!(trips[0].arrival.timestamp(), 1_700_000_300);
        assert_eq!(trips[0].delay, chrono::Duration::seconds(45));
        assert!(trips[0].assigned);
        assert_eq!(trips[0].destination, Some(StationIdentifier::new("R01")));

        // Fractional seconds truncate, missing flags default
        assert_eq!(trips[1].arrival.timestamp(), 1_700_000_400);
        assert!(!trips[1].assigned);
        assert_eq!(trips[1].destination, None);
    }

    #[test]
    fn test_decode_south_is_empty() {
        let stop: StopResponse = serde_json::from_str(STOP_JSON).unwrap();
        assert!(stop.upcoming_trips.into_records(Direction::South).unwrap().is_empty());
    }

    #[test]
    fn test_missing_upcoming_trips() {
        let stop: StopResponse = serde_json::from_str(r#"{"id": "234"}"#).unwrap();
        assert!(stop.upcoming_trips.into_records(Direction::North).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_arrival_is_rejected() {
        let trip = WireTrip {
            id: TripIdentifier::new("bad"),
            route_id: RouteIdentifier::new("R"),
            estimated_current_stop_arrival_time: 1e20,
            delayed_time: 0.0,
            is_assigned: false,
            destination_stop: None,
        };

        assert!(matches!(
            TripRecord::try_from(trip),
            Err(TransitError::InvalidData(_))
        ));
    }

    #[test]
    fn test_out_of_range_delay_is_rejected() {
        let json = r#"{
            "north": [{
                "id": "t",
                "route_id": "R",
                "estimated_current_stop_arrival_time": 1700000300.0,
                "delayed_time": 1e17
            }]
        }"#;
        let trips: UpcomingTrips = serde_json::from_str(json).unwrap();

        assert!(matches!(
            trips.into_records(Direction::North),
            Err(TransitError::InvalidData(_))
        ));
    }

    #[test]
    fn test_stop_url() {
        let client = SubwayNowClient::new("https://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.stop_url(&StationIdentifier::new("234")),
            "https://example.test/stops/234"
        );
    }
}
