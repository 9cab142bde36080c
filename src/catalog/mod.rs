//! Catalog Module
//!
//! HTTP access to the creature catalog and the cached fetchers built on it.

mod fetcher;
mod http;
mod model;

pub use fetcher::{ActionFetcher, EntityFetcher};
pub use http::CatalogHttp;
pub use model::{Action, ActionRef, Entity, SENTINEL_ACTION};
