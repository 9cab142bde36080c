//! API Routes
//!
//! Configures the Axum router with all matchup service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    action_handler, cancel_matchup_handler, entity_handler, health_handler, not_found_handler,
    retry_matchup_handler, start_matchup_handler, stats_handler, view_matchup_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /matchup` - Start a new round
/// - `GET /matchup` - Current matchup view
/// - `DELETE /matchup` - Cancel the round in progress
/// - `POST /matchup/retry` - Retry after a failure
/// - `GET /entities/:id` - Fetch one entity
/// - `GET /actions/:name` - Fetch one action (optional `?reference=`)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so a browser UI can call the service
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/matchup",
            get(view_matchup_handler)
                .post(start_matchup_handler)
                .delete(cancel_matchup_handler),
        )
        .route("/matchup/retry", post(retry_matchup_handler))
        .route("/entities/:id", get(entity_handler))
        .route("/actions/:name", get(action_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
