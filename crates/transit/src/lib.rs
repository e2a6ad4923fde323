//! # subway-time-transit
//!
//! Upcoming-arrival data for the stations shown on the subway clock.
//!
//! ## Features
//!
//! - **Typed identifiers**: cheap-to-clone station, route, trip and line ids
//! - **Line filtering**: route membership plus a minimum lead time per tracked line
//! - **Pluggable networking**: implement [`ArrivalSource`] to feed trips from anywhere
//! - **SubwayNow adapter**: HTTP client for `api.subwaynow.app`
//!
//! ## Example
//!
//! ```
//! use subway_time_transit::prelude::*;
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let trips = vec![TripRecord {
//!     trip_id: TripIdentifier::new("trip-1"),
//!     route_id: RouteIdentifier::new("R"),
//!     arrival: now + Duration::minutes(6),
//!     delay: Duration::zero(),
//!     assigned: true,
//!     destination: None,
//! }];
//!
//! let filter = TripFilter::new(Duration::minutes(2), ["R"]);
//! let snapshot = LineSnapshot::from_trips(Direction::North, &trips, &filter, now);
//! assert_eq!(snapshot.arrivals().len(), 1);
//! ```

pub mod identifiers;
pub mod models;
pub mod network;
pub mod provider;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{filter::*, types::*};
    pub use crate::network::{fetcher::LineFetcher, traits::*};
    pub use crate::provider::subway_now::SubwayNowClient;
}

pub use prelude::*;
