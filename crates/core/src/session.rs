//! Per-user session engine.
//!
//! One `SessionEngine` owns a user's behavior profile, recommendation lists,
//! and search state for the session's lifetime. It is constructed explicitly
//! and passed by reference (no ambient global state), which keeps lifecycle
//! and test isolation obvious.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::behavior::BehaviorTracker;
use crate::catalog::CatalogProvider;
use crate::config::EngineConfig;
use crate::domain::behavior::{BehaviorProfile, SearchRecord};
use crate::domain::product::{Product, ProductId};
use crate::domain::search::{FilterPatch, SearchFilters, SearchState};
use crate::engagement::{EngagementEvent, EngagementSignal, EngagementSink, NoopEngagementSink};
use crate::recs::{
    collaborative, content, frequent, hybrid, preferences, similar, trending, ModelState,
    RecommendationItem, RecommendationSet, SimilarityScorer,
};
use crate::search::{pipeline, suggestions::SuggestionEngine};

/// Session tuning derived from [`EngineConfig`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub search_latency: Duration,
    pub suggestion_cache_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_latency: Duration::from_millis(500),
            suggestion_cache_ttl: Duration::from_secs(300),
        }
    }
}

impl From<&EngineConfig> for SessionConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            search_latency: Duration::from_millis(config.search_latency_ms),
            suggestion_cache_ttl: Duration::from_secs(config.suggestion_cache_ttl_secs),
        }
    }
}

/// Persisted recommendation-side state for one user/session key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSnapshot {
    pub user_behavior: BehaviorProfile,
    pub recommendations: RecommendationSet,
    pub ai_model: ModelState,
}

/// Persisted search-side state. Transient fields are never part of this.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub recent_searches: Vec<String>,
    pub search_history: Vec<SearchRecord>,
}

pub struct SessionEngine {
    session_id: String,
    config: SessionConfig,
    catalog: Arc<dyn CatalogProvider>,
    sink: Arc<dyn EngagementSink>,
    scorer: SimilarityScorer,
    behavior: RwLock<BehaviorTracker>,
    recommendations: RwLock<RecommendationSet>,
    model: RwLock<ModelState>,
    search: RwLock<SearchState>,
    suggester: Mutex<SuggestionEngine>,
    /// Lazily cached catalog for suggestion lookups.
    suggestion_catalog: Mutex<Option<Vec<Product>>>,
    /// Bumped by every perform_search call; a response only commits when its
    /// generation is still current, so a newer search supersedes a stale one.
    search_generation: AtomicU64,
}

impl SessionEngine {
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: SessionConfig) -> Self {
        let suggestion_cache_ttl = config.suggestion_cache_ttl;
        Self {
            session_id: Uuid::new_v4().to_string(),
            config,
            catalog,
            sink: Arc::new(NoopEngagementSink),
            scorer: SimilarityScorer::new(),
            behavior: RwLock::new(BehaviorTracker::new()),
            recommendations: RwLock::new(RecommendationSet::default()),
            model: RwLock::new(ModelState::default()),
            search: RwLock::new(SearchState::default()),
            suggester: Mutex::new(SuggestionEngine::new(suggestion_cache_ttl)),
            suggestion_catalog: Mutex::new(None),
            search_generation: AtomicU64::new(0),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EngagementSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    // -------------------------------------------------------------------------
    // Behavior tracking
    // -------------------------------------------------------------------------

    pub async fn track_view(&self, product_id: ProductId, duration_secs: f64) {
        self.behavior.write().await.track_view(product_id.clone(), duration_secs);
        self.sink.publish(EngagementSignal::now(EngagementEvent::ProductViewed {
            product_id,
            duration_secs: duration_secs.max(0.0),
        }));
    }

    pub async fn track_click(&self, product_id: ProductId, click_type: impl Into<String>) {
        let session_id = self.session_id.clone();
        self.behavior.write().await.track_click(product_id, click_type, session_id);
    }

    pub async fn track_search(&self, term: impl Into<String>, matched: Vec<ProductId>) {
        self.behavior.write().await.track_search(term, matched);
    }

    pub async fn track_purchase(&self, product_id: ProductId, quantity: u32) {
        self.behavior.write().await.track_purchase(product_id.clone(), quantity);
        self.sink.publish(EngagementSignal::now(EngagementEvent::ProductPurchased {
            product_id,
            quantity: quantity.max(1),
        }));
    }

    pub async fn toggle_wishlist(&self, product_id: ProductId) -> bool {
        let added = self.behavior.write().await.toggle_wishlist(product_id.clone());
        self.sink.publish(EngagementSignal::now(EngagementEvent::WishlistToggled {
            product_id,
            added,
        }));
        added
    }

    pub async fn behavior_profile(&self) -> BehaviorProfile {
        self.behavior.read().await.profile().clone()
    }

    /// Drops all tracked behavior and derived recommendation state. Exposed
    /// for testing/reset.
    pub async fn clear_all_behavior_data(&self) {
        self.behavior.write().await.clear_all();
        *self.recommendations.write().await = RecommendationSet::default();
        *self.model.write().await = ModelState::default();
    }

    // -------------------------------------------------------------------------
    // Recommendations
    // -------------------------------------------------------------------------

    /// Blend the collaborative and content-based lists into the personalized
    /// recommendation list, refreshing the display-only model state.
    pub async fn generate_personalized_recommendations(
        &self,
        catalog: &[Product],
    ) -> Vec<RecommendationItem> {
        let profile = self.behavior_profile().await;

        let collaborative_items = collaborative::recommend(&profile, catalog, &self.scorer);
        let prefs = preferences::analyze(&profile, catalog);
        let content_items = content::recommend(&prefs, catalog);

        let blended = hybrid::combine(collaborative_items, content_items);
        hybrid::refresh_model_state(&mut *self.model.write().await, blended.len());

        debug!(
            session_id = %self.session_id,
            result_count = blended.len(),
            "personalized recommendations generated"
        );

        self.recommendations.write().await.personalized = blended.clone();
        blended
    }

    pub async fn generate_trending_recommendations(
        &self,
        catalog: &[Product],
    ) -> Vec<RecommendationItem> {
        let items = trending::recommend(catalog);
        self.recommendations.write().await.trending = items.clone();
        items
    }

    pub async fn get_similar_products(
        &self,
        product_id: &ProductId,
        catalog: &[Product],
    ) -> Vec<RecommendationItem> {
        let items = similar::similar_to(product_id, catalog, &self.scorer);
        self.recommendations.write().await.similar = items.clone();
        items
    }

    pub async fn generate_frequently_bought(
        &self,
        catalog: &[Product],
    ) -> Vec<RecommendationItem> {
        let profile = self.behavior_profile().await;
        let items = frequent::recommend(&profile, catalog, &self.scorer);
        self.recommendations.write().await.frequently_bought = items.clone();
        items
    }

    pub async fn recommendations(&self) -> RecommendationSet {
        self.recommendations.read().await.clone()
    }

    pub async fn model_state(&self) -> ModelState {
        self.model.read().await.clone()
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    pub async fn set_search_query(&self, query: impl Into<String>) {
        let mut state = self.search.write().await;
        state.query = query.into();
        state.show_suggestions = !state.query.trim().is_empty();
    }

    pub async fn update_filters(&self, patch: FilterPatch) {
        self.search.write().await.filters.apply(patch);
    }

    pub async fn reset_filters(&self) {
        self.search.write().await.filters = SearchFilters::default();
    }

    pub async fn add_to_search_history(&self, term: &str) {
        self.search.write().await.remember_search(term);
    }

    pub async fn clear_search_history(&self) {
        self.search.write().await.recent_searches.clear();
        self.behavior.write().await.clear_search_history();
    }

    pub async fn search_state(&self) -> SearchState {
        self.search.read().await.clone()
    }

    /// Run a search after the simulated network latency. A call whose
    /// generation has been superseded by a newer search mutates nothing and
    /// returns an empty list, on the failure path too; a current-generation
    /// catalog failure degrades to an empty result set with `is_searching`
    /// reset, never an error.
    pub async fn perform_search(
        &self,
        query: impl Into<String>,
        filters: Option<FilterPatch>,
    ) -> Vec<Product> {
        let query = query.into();
        let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.search.write().await;
            state.query = query.clone();
            if let Some(patch) = filters {
                state.filters.apply(patch);
            }
            state.is_searching = true;
        }

        if !self.config.search_latency.is_zero() {
            tokio::time::sleep(self.config.search_latency).await;
        }

        let catalog = match self.catalog.snapshot().await {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(session_id = %self.session_id, %error, "search failed; returning empty results");
                let mut state = self.search.write().await;
                if self.search_generation.load(Ordering::SeqCst) == generation {
                    state.results.clear();
                    state.is_searching = false;
                }
                return Vec::new();
            }
        };

        // The generation check and the commit share one write lock so a
        // superseded response can never clobber a newer one.
        let results = {
            let mut state = self.search.write().await;
            if self.search_generation.load(Ordering::SeqCst) != generation {
                debug!(session_id = %self.session_id, query = %query, "stale search superseded");
                return Vec::new();
            }
            let results = pipeline::run(&catalog, &query, &state.filters);
            state.results = results.clone();
            state.is_searching = false;
            state.remember_search(&query);
            results
        };

        let matched: Vec<ProductId> = results.iter().map(|product| product.id.clone()).collect();
        if !query.trim().is_empty() {
            self.behavior.write().await.track_search(query.clone(), matched);
        }
        self.sink.publish(EngagementSignal::now(EngagementEvent::SearchPerformed {
            term: query,
            result_count: results.len(),
        }));

        results
    }

    /// Autocomplete suggestions. The catalog snapshot is fetched lazily on
    /// first use and kept for the session; lookups go through the TTL cache.
    pub async fn suggest(&self, query: &str) -> Vec<String> {
        let mut cached = self.suggestion_catalog.lock().await;
        if cached.is_none() {
            match self.catalog.snapshot().await {
                Ok(catalog) => *cached = Some(catalog),
                Err(error) => {
                    warn!(session_id = %self.session_id, %error, "suggestion catalog fetch failed");
                    return Vec::new();
                }
            }
        }
        let catalog = cached.as_deref().unwrap_or(&[]);

        let suggestions = self.suggester.lock().await.suggest(query, catalog);
        self.search.write().await.suggestions = suggestions.clone();
        suggestions
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    pub async fn behavior_snapshot(&self) -> BehaviorSnapshot {
        BehaviorSnapshot {
            user_behavior: self.behavior_profile().await,
            recommendations: self.recommendations().await,
            ai_model: self.model_state().await,
        }
    }

    pub async fn search_snapshot(&self) -> SearchSnapshot {
        let state = self.search.read().await;
        let history = self.behavior.read().await.profile().search_history.clone();
        SearchSnapshot {
            recent_searches: state.recent_searches.clone(),
            search_history: history.into_iter().collect(),
        }
    }

    /// Rehydrate a session from persisted snapshots. Transient search fields
    /// start fresh.
    pub async fn restore(
        &self,
        behavior: Option<BehaviorSnapshot>,
        search: Option<SearchSnapshot>,
    ) {
        if let Some(snapshot) = behavior {
            *self.behavior.write().await = BehaviorTracker::from_profile(snapshot.user_behavior);
            *self.recommendations.write().await = snapshot.recommendations;
            *self.model.write().await = snapshot.ai_model;
        }

        if let Some(snapshot) = search {
            let mut state = self.search.write().await;
            state.recent_searches = snapshot.recent_searches;

            let mut behavior = self.behavior.write().await;
            if behavior.profile().search_history.is_empty() {
                for record in snapshot.search_history {
                    behavior.track_search(record.term, record.matched);
                }
            }
        }
    }
}
