//! API Module
//!
//! HTTP handlers and routing for the matchup service REST API.
//!
//! # Endpoints
//! - `POST /matchup` - Start a new round
//! - `GET /matchup` - Current matchup view
//! - `DELETE /matchup` - Cancel the round in progress
//! - `POST /matchup/retry` - Retry after a failure
//! - `GET /entities/:id` - Fetch one entity
//! - `GET /actions/:name` - Fetch one action
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
