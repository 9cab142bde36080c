//! Cache Module
//!
//! Provides a bounded FIFO cache and a request coordinator that deduplicates
//! in-flight fetches on top of it.

mod bounded;
mod coordinator;
mod stats;


// Re-export public types
pub use bounded::BoundedCache;
pub use coordinator::RequestCoordinator;
pub use stats::CacheStats;
