//! Network abstractions and the per-line bound fetcher.

pub mod fetcher;
pub mod traits;

pub use fetcher::LineFetcher;
pub use traits::ArrivalSource;
