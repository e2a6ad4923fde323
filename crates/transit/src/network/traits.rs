//! Pluggable networking traits.
//!
//! The HTTP adapter in [`crate::provider`] implements these; tests supply
//! in-memory fakes.

use std::future::Future;
use std::pin::Pin;

use crate::identifiers::StationIdentifier;
use crate::models::types::{Direction, Result, TripRecord};

/// Fetch the raw upcoming trips at a station for one direction
pub trait ArrivalSource: Send + Sync {
    fn upcoming_trips<'a>(
        &'a self,
        station: &'a StationIdentifier,
        direction: Direction,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TripRecord>>> + Send + 'a>>;
}
