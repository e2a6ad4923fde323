pub mod cache;
pub mod line;
pub mod payload;
pub mod poll;
pub mod publish;
pub mod render;
pub mod sprite;
pub mod weather;

// Re-exports for convenience
pub use subway_time_transit as transit;

pub use line::TrackedLine;
pub use poll::{LineError, PollLoop};
pub use publish::{PublishError, Publisher};
pub use weather::{WeatherEffect, WeatherTracker};
