//! Match predicate deciding which raw trips count for a tracked line.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::identifiers::RouteIdentifier;
use crate::models::types::TripRecord;

/// Accepts trips on any of `routes` that arrive at least `min_lead` from now.
///
/// Trains closer than the lead time are suppressed: there is no point showing
/// an arrival nobody can walk to the platform in time for.
#[derive(Clone, Debug)]
pub struct TripFilter {
    routes: HashSet<RouteIdentifier>,
    min_lead: Duration,
}

impl TripFilter {
    pub fn new<R>(min_lead: Duration, routes: impl IntoIterator<Item = R>) -> Self
    where
        R: Into<RouteIdentifier>,
    {
        Self {
            routes: routes.into_iter().map(Into::into).collect(),
            min_lead,
        }
    }

    pub fn min_lead(&self) -> Duration {
        self.min_lead
    }

    pub fn matches(&self, trip: &TripRecord, now: DateTime<Utc>) -> bool {
        self.routes.contains(&trip.route_id) && trip.arrival - now >= self.min_lead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::TripIdentifier;

    fn trip(route: &str, seconds_away: i64, now: DateTime<Utc>) -> TripRecord {
        TripRecord {
            trip_id: TripIdentifier::new("t"),
            route_id: RouteIdentifier::new(route),
            arrival: now + Duration::seconds(seconds_away),
            delay: Duration::zero(),
            assigned: true,
            destination: None,
        }
    }

    #[test]
    fn test_route_membership() {
        let now = Utc::now();
        let filter = TripFilter::new(Duration::minutes(4), ["4", "5"]);

        assert!(filter.matches(&trip("4", 600, now), now));
        assert!(filter.matches(&trip("5", 600, now), now));
        assert!(!filter.matches(&trip("6", 600, now), now));
    }

    #[test]
    fn test_min_lead_boundary() {
        let now = Utc::now();
        let filter = TripFilter::new(Duration::minutes(2), ["R"]);

        assert!(!filter.matches(&trip("R", 119, now), now));
        assert!(filter.matches(&trip("R", 120, now), now));
        assert!(!filter.matches(&trip("R", -30, now), now));
    }
}
