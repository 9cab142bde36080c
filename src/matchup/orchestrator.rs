//! Matchup Orchestrator
//!
//! Runs rounds: two random entities, one random action each, a verdict.
//! Each round is tagged with a generation number; only the current round may
//! publish to the view.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::CacheStats;
use crate::catalog::{Action, ActionFetcher, CatalogHttp, Entity, EntityFetcher};
use crate::config::Config;
use crate::error::FetchError;
use crate::matchup::picker::{Picker, RandomPicker};
use crate::matchup::verdict::{Contender, Verdict};

// == Matchup View ==
/// Everything a UI needs to render the current matchup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchupView {
    /// Generation of the round this view belongs to
    pub round: u64,
    pub loading: bool,
    /// Human-readable failure of the current round
    pub error: Option<String>,
    pub contenders: Vec<Contender>,
    pub verdict: Option<Verdict>,
    /// Rendered verdict message
    pub outcome: Option<String>,
}

/// What happened to a round once it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundResult {
    /// The round was current and its results are now visible
    Applied(MatchupView),
    /// A newer round or a cancel replaced this one; its results were dropped
    Superseded { round: u64 },
}

// == Orchestrator ==
/// Runs matchup rounds against the entity and action fetchers and owns the
/// view the UI renders.
pub struct Orchestrator {
    entities: EntityFetcher,
    actions: ActionFetcher,
    picker: Arc<dyn Picker>,
    view: RwLock<MatchupView>,
}

impl Orchestrator {
    pub fn new(entities: EntityFetcher, actions: ActionFetcher, picker: Arc<dyn Picker>) -> Self {
        Self {
            entities,
            actions,
            picker,
            view: RwLock::new(MatchupView::default()),
        }
    }

    /// Builds fetchers and a random picker from configuration.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let http = CatalogHttp::from_config(config)?;
        Ok(Self::new(
            EntityFetcher::new(http.clone(), config.entity_cache_size),
            ActionFetcher::new(http, config.action_cache_size),
            Arc::new(RandomPicker::new(config.max_entity_id)),
        ))
    }

    // == New Round ==
    /// Starts a new matchup, superseding any round still in progress.
    ///
    /// Fetch failures are published to the view and returned. If another
    /// round starts (or `cancel` is called) before this one finishes, its
    /// results and errors are dropped and `Superseded` is returned. Network
    /// calls already started keep running and still fill the caches.
    pub async fn new_round(&self) -> Result<RoundResult, FetchError> {
        let round = self.begin_round().await;
        info!(round, "starting matchup round");

        let result = match self.play(round).await {
            Ok(Some(contenders)) => Ok(contenders),
            Ok(None) => {
                debug!(round, "round went stale before fetching actions");
                return Ok(RoundResult::Superseded { round });
            }
            Err(err) => Err(err),
        };
        self.finish_round(round, result).await
    }

    /// Manual retry after a failure; identical to starting a new round.
    pub async fn retry(&self) -> Result<RoundResult, FetchError> {
        self.new_round().await
    }

    // == Cancel ==
    /// Marks the current round stale without starting another. Results of
    /// earlier rounds are cleared along with it.
    pub async fn cancel(&self) -> MatchupView {
        let mut view = self.view.write().await;
        *view = MatchupView {
            round: view.round + 1,
            ..MatchupView::default()
        };
        info!(round = view.round, "matchup round cancelled");
        view.clone()
    }

    /// Snapshot of the current view.
    pub async fn view(&self) -> MatchupView {
        self.view.read().await.clone()
    }

    pub async fn is_current(&self, round: u64) -> bool {
        self.view.read().await.round == round
    }

    pub fn entities(&self) -> &EntityFetcher {
        &self.entities
    }

    pub fn actions(&self) -> &ActionFetcher {
        &self.actions
    }

    /// Cache statistics for the entity and action caches.
    pub async fn cache_stats(&self) -> (CacheStats, CacheStats) {
        tokio::join!(self.entities.stats(), self.actions.stats())
    }

    async fn begin_round(&self) -> u64 {
        let mut view = self.view.write().await;
        let round = view.round + 1;
        *view = MatchupView {
            round,
            loading: true,
            ..MatchupView::default()
        };
        round
    }

    /// Fetches both contenders. `None` means the round went stale between
    /// the entity and action fetches.
    async fn play(&self, round: u64) -> Result<Option<[Contender; 2]>, FetchError> {
        let first_id = self.picker.entity_id();
        let second_id = self.picker.entity_id();
        debug!(round, first_id, second_id, "picked entities");

        let (first, second) =
            tokio::try_join!(self.entities.fetch(first_id), self.entities.fetch(second_id))?;

        if !self.is_current(round).await {
            return Ok(None);
        }

        let (first_action, second_action) =
            tokio::try_join!(self.pick_action(&first), self.pick_action(&second))?;

        Ok(Some([
            Contender {
                entity: first,
                action: first_action,
            },
            Contender {
                entity: second,
                action: second_action,
            },
        ]))
    }

    async fn pick_action(&self, entity: &Entity) -> Result<Action, FetchError> {
        if entity.actions.is_empty() {
            debug!(entity = %entity.name, "no actions available, using sentinel");
            return Ok(Action::sentinel());
        }

        let last = entity.actions.len() - 1;
        let index = self.picker.action_index(entity.actions.len()).min(last);
        let action = &entity.actions[index];
        self.actions.fetch(&action.reference, &action.name).await
    }

    async fn finish_round(
        &self,
        round: u64,
        result: Result<[Contender; 2], FetchError>,
    ) -> Result<RoundResult, FetchError> {
        let mut view = self.view.write().await;
        if view.round != round {
            debug!(round, current = view.round, "dropping superseded round");
            return Ok(RoundResult::Superseded { round });
        }

        view.loading = false;
        match result {
            Ok([first, second]) => {
                let verdict = Verdict::decide(&first, &second);
                info!(round, outcome = %verdict, "matchup decided");
                view.outcome = Some(verdict.to_string());
                view.verdict = Some(verdict);
                view.contenders = vec![first, second];
                Ok(RoundResult::Applied(view.clone()))
            }
            Err(err) => {
                warn!(round, error = %err, "matchup round failed");
                view.error = Some(format!("Could not load a matchup: {}", err));
                Err(err)
            }
        }
    }
}
