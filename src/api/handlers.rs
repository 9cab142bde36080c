//! API Handlers
//!
//! HTTP request handlers for each matchup service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    Json,
};

use crate::catalog::{Action, Entity};
use crate::config::Config;
use crate::error::{ApiError, FetchError, Result};
use crate::matchup::{MatchupView, Orchestrator, RoundResult};
use crate::models::{ActionQuery, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, FetchError> {
        Ok(Self::new(Orchestrator::from_config(config)?))
    }
}

fn round_response(result: std::result::Result<RoundResult, FetchError>) -> Result<Json<MatchupView>> {
    match result? {
        RoundResult::Applied(view) => Ok(Json(view)),
        RoundResult::Superseded { round } => Err(ApiError::Superseded(format!(
            "round {} was replaced by a newer round",
            round
        ))),
    }
}

/// Handler for POST /matchup
///
/// Starts a new round and responds once it settles.
pub async fn start_matchup_handler(State(state): State<AppState>) -> Result<Json<MatchupView>> {
    round_response(state.orchestrator.new_round().await)
}

/// Handler for POST /matchup/retry
pub async fn retry_matchup_handler(State(state): State<AppState>) -> Result<Json<MatchupView>> {
    round_response(state.orchestrator.retry().await)
}

/// Handler for DELETE /matchup
///
/// Cancels the round in progress, if any.
pub async fn cancel_matchup_handler(State(state): State<AppState>) -> Json<MatchupView> {
    Json(state.orchestrator.cancel().await)
}

/// Handler for GET /matchup
pub async fn view_matchup_handler(State(state): State<AppState>) -> Json<MatchupView> {
    Json(state.orchestrator.view().await)
}

/// Handler for GET /entities/:id
pub async fn entity_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Entity>> {
    if id == 0 {
        return Err(ApiError::InvalidRequest(
            "Entity id must be positive".to_string(),
        ));
    }

    let entity = state.orchestrator.entities().fetch(id).await?;
    Ok(Json(entity))
}

/// Handler for GET /actions/:name
///
/// Uses `?reference=` when given, otherwise the catalog's URL for the name.
/// An explicit reference must point into the catalog.
pub async fn action_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ActionQuery>,
) -> Result<Json<Action>> {
    if let Some(error_msg) = query.validate(&name) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let actions = state.orchestrator.actions();
    let reference = match query.reference {
        Some(reference) if !actions.is_catalog_reference(&reference) => {
            return Err(ApiError::InvalidRequest(
                "Reference must point into the catalog".to_string(),
            ));
        }
        Some(reference) => reference,
        None => actions.reference_for(&name),
    };
    let action = actions.fetch(&reference, &name).await?;
    Ok(Json(action))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (entities, actions) = state.orchestrator.cache_stats().await;
    Json(StatsResponse::new(entities, actions))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::catalog::{ActionFetcher, CatalogHttp, EntityFetcher};
    use crate::matchup::RandomPicker;

    fn offline_state() -> AppState {
        let http = CatalogHttp::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        AppState::new(Orchestrator::new(
            EntityFetcher::new(http.clone(), 8),
            ActionFetcher::new(http, 8),
            Arc::new(RandomPicker::new(10)),
        ))
    }

    #[tokio::test]
    async fn test_view_handler_starts_empty() {
        let response = view_matchup_handler(State(offline_state())).await;
        assert_eq!(response.round, 0);
        assert!(response.contenders.is_empty());
    }

    #[tokio::test]
    async fn test_start_handler_reports_upstream_failure() {
        let state = offline_state();

        let result = start_matchup_handler(State(state.clone())).await;
        assert!(matches!(result, Err(ApiError::Upstream(_))));

        let view = view_matchup_handler(State(state)).await;
        assert!(view.error.is_some());
    }

    #[tokio::test]
    async fn test_cancel_handler() {
        let response = cancel_matchup_handler(State(offline_state())).await;
        assert_eq!(response.round, 1);
        assert!(!response.loading);
    }

    #[tokio::test]
    async fn test_entity_handler_rejects_zero() {
        let result = entity_handler(State(offline_state()), Path(0)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_action_handler_rejects_bad_name() {
        let result = action_handler(
            State(offline_state()),
            Path("not a move".to_string()),
            Query(ActionQuery::default()),
        )
        .await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_action_handler_rejects_foreign_reference() {
        let query = ActionQuery {
            reference: Some("https://elsewhere.test/move/ember".to_string()),
        };
        let result =
            action_handler(State(offline_state()), Path("ember".to_string()), Query(query)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(offline_state())).await;
        assert_eq!(response.entities.stats.hits, 0);
        assert_eq!(response.actions.stats.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
