//! Arrival data providers.

pub mod subway_now;

pub use subway_now::SubwayNowClient;
