//! Entity and action fetchers
//!
//! Request coordinators bound to the catalog endpoints.

use crate::cache::{CacheStats, RequestCoordinator};
use crate::catalog::http::CatalogHttp;
use crate::catalog::model::{Action, ActionPayload, Entity, EntityPayload};
use crate::error::FetchError;

// == Entity Fetcher ==
/// Fetches entities by numeric id through a dedicated cache.
#[derive(Debug, Clone)]
pub struct EntityFetcher {
    http: CatalogHttp,
    coordinator: RequestCoordinator<u32, Entity>,
}

impl EntityFetcher {
    pub fn new(http: CatalogHttp, capacity: usize) -> Self {
        Self {
            http,
            coordinator: RequestCoordinator::new("entities", capacity),
        }
    }

    /// Returns the entity with `id`, hitting the network only on a cold key.
    pub async fn fetch(&self, id: u32) -> Result<Entity, FetchError> {
        let http = self.http.clone();
        self.coordinator
            .resolve(id, move || async move {
                let payload: EntityPayload = http.get_json(&http.entity_url(id)).await?;
                Ok(payload.into_entity(id))
            })
            .await
    }

    pub async fn stats(&self) -> CacheStats {
        self.coordinator.stats().await
    }

    pub async fn clear(&self) {
        self.coordinator.clear().await
    }
}

// == Action Fetcher ==
/// Fetches actions keyed by name. The reference is only used to build the
/// request when the name is not cached or in flight.
#[derive(Debug, Clone)]
pub struct ActionFetcher {
    http: CatalogHttp,
    coordinator: RequestCoordinator<String, Action>,
}

impl ActionFetcher {
    pub fn new(http: CatalogHttp, capacity: usize) -> Self {
        Self {
            http,
            coordinator: RequestCoordinator::new("actions", capacity),
        }
    }

    /// A body naming a different action is a decode failure, so it never
    /// lands in the cache under `name`.
    pub async fn fetch(&self, reference: &str, name: &str) -> Result<Action, FetchError> {
        let http = self.http.clone();
        let reference = reference.to_string();
        let expected = name.to_string();
        self.coordinator
            .resolve(name.to_string(), move || async move {
                let payload: ActionPayload = http.get_json(&reference).await?;
                let action = Action::from(payload);
                if action.name != expected {
                    return Err(FetchError::Decode(format!(
                        "GET {} returned action '{}', expected '{}'",
                        reference, action.name, expected
                    )));
                }
                Ok(action)
            })
            .await
    }

    /// True when `reference` is a URL on the configured catalog.
    pub fn is_catalog_reference(&self, reference: &str) -> bool {
        self.http.is_catalog_url(reference)
    }

    /// Default reference for an action known only by name.
    pub fn reference_for(&self, name: &str) -> String {
        self.http.action_url(name)
    }

    pub async fn stats(&self) -> CacheStats {
        self.coordinator.stats().await
    }

    pub async fn clear(&self) {
        self.coordinator.clear().await
    }
}
