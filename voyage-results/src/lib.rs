pub mod enricher;
pub mod filter;
pub mod summary;

pub use enricher::{EnrichmentSource, FixedSource, RandomSource, enrich_flights};
pub use filter::{FilterSpec, MinuteWindow, filter_and_sort};
pub use summary::ResultSummary;
