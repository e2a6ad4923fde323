//! Arrival data models, types, and the line match predicate.

pub mod filter;
pub mod types;

// Re-exports for convenience
pub use filter::TripFilter;
pub use types::{ArrivalEstimate, Direction, LineSnapshot, Result, TransitError, TripRecord};
