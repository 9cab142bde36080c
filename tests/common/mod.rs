//! Shared test helpers: an in-process mock catalog served by axum.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::task::JoinHandle;

use creature_clash::catalog::{ActionFetcher, CatalogHttp, EntityFetcher};
use creature_clash::matchup::{Orchestrator, Picker};

// == Mock Data ==
#[derive(Debug, Clone, Default)]
pub struct MockEntity {
    pub name: String,
    pub moves: Vec<String>,
    pub delay: Duration,
    pub malformed: bool,
}

impl MockEntity {
    pub fn new(name: &str, moves: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub entities: HashMap<u32, MockEntity>,
    pub actions: HashMap<String, Option<u32>>,
}

impl CatalogData {
    pub fn entity(mut self, id: u32, entity: MockEntity) -> Self {
        self.entities.insert(id, entity);
        self
    }

    pub fn action(mut self, name: &str, power: Option<u32>) -> Self {
        self.actions.insert(name.to_string(), power);
        self
    }
}

/// The classic starters with one damaging action each, plus a status move.
pub fn starter_catalog() -> CatalogData {
    CatalogData::default()
        .entity(1, MockEntity::new("bulbasaur", &["vine-whip"]))
        .entity(4, MockEntity::new("charmander", &["ember"]))
        .entity(7, MockEntity::new("squirtle", &["tail-whip"]))
        .entity(132, MockEntity::new("ditto", &[]))
        .action("vine-whip", Some(45))
        .action("ember", Some(40))
        .action("tail-whip", None)
}

// == Mock Server ==
#[derive(Clone)]
struct MockState {
    base_url: String,
    data: Arc<CatalogData>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockState {
    fn record(&self, uri: &Uri) {
        let mut hits = self.hits.lock().unwrap();
        *hits.entry(uri.path().to_string()).or_insert(0) += 1;
    }
}

pub struct MockCatalog {
    pub base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    handle: JoinHandle<()>,
}

impl MockCatalog {
    /// Serves `data` on an ephemeral localhost port.
    pub async fn spawn(data: CatalogData) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(HashMap::new()));

        let state = MockState {
            base_url: base_url.clone(),
            data: Arc::new(data),
            hits: Arc::clone(&hits),
        };
        let app = Router::new()
            .route("/pokemon/:id", get(entity_route))
            .route("/move/:name", get(action_route))
            .with_state(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            hits,
            handle,
        }
    }

    /// Number of requests received for `path`, e.g. `/pokemon/1`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn http(&self) -> CatalogHttp {
        CatalogHttp::new(self.base_url.clone(), Duration::from_secs(2)).unwrap()
    }
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn entity_route(State(state): State<MockState>, uri: Uri, Path(id): Path<u32>) -> Response {
    state.record(&uri);
    let Some(entity) = state.data.entities.get(&id).cloned() else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    tokio::time::sleep(entity.delay).await;

    if entity.malformed {
        return (StatusCode::OK, "{\"name\": ").into_response();
    }

    let moves: Vec<_> = entity
        .moves
        .iter()
        .map(|name| {
            json!({
                "move": { "name": name, "url": format!("{}/move/{}", state.base_url, name) }
            })
        })
        .collect();

    Json(json!({
        "id": id,
        "name": entity.name,
        "sprites": { "front_default": format!("https://img.example/{}.png", id) },
        "moves": moves,
    }))
    .into_response()
}

async fn action_route(
    State(state): State<MockState>,
    uri: Uri,
    Path(name): Path<String>,
) -> Response {
    state.record(&uri);
    match state.data.actions.get(&name) {
        Some(power) => Json(json!({ "name": name, "power": power })).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

// == Pickers ==
/// Hands out entity ids in a fixed order and always picks the first action.
pub struct ScriptedPicker {
    ids: Mutex<VecDeque<u32>>,
}

impl ScriptedPicker {
    pub fn new(ids: &[u32]) -> Arc<Self> {
        Arc::new(Self {
            ids: Mutex::new(ids.iter().copied().collect()),
        })
    }
}

impl Picker for ScriptedPicker {
    fn entity_id(&self) -> u32 {
        self.ids
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted picker ran out of ids")
    }

    fn action_index(&self, _available: usize) -> usize {
        0
    }
}

pub fn orchestrator(catalog: &MockCatalog, ids: &[u32]) -> Orchestrator {
    let http = catalog.http();
    Orchestrator::new(
        EntityFetcher::new(http.clone(), 16),
        ActionFetcher::new(http, 16),
        ScriptedPicker::new(ids),
    )
}
