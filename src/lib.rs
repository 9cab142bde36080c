//! Creature Clash - A creature matchup service
//!
//! Fetches two random creatures and one action each from a catalog API,
//! behind a bounded cache that deduplicates in-flight requests.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matchup;
pub mod models;

pub use api::AppState;
pub use config::Config;
pub use matchup::Orchestrator;
