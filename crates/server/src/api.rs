//! HTTP surface over per-user session engines.
//!
//! Sessions are keyed by the user segment of the path. The first request for
//! a user rehydrates their session from the state repositories; saves are
//! explicit via the save endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::error;
use uuid::Uuid;

use vitrine_core::domain::product::{Product, ProductId};
use vitrine_core::domain::search::{FilterPatch, SearchState};
use vitrine_core::errors::{ApplicationError, InterfaceError};
use vitrine_core::recs::{RecommendationItem, RecommendationSet};
use vitrine_core::session::{SessionConfig, SessionEngine};
use vitrine_core::CatalogProvider;
use vitrine_db::{BehaviorStateRepository, RepositoryError, SearchStateRepository};

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<dyn CatalogProvider>,
    behavior_repo: Arc<dyn BehaviorStateRepository>,
    search_repo: Arc<dyn SearchStateRepository>,
    session_config: SessionConfig,
    sessions: Arc<RwLock<HashMap<String, Arc<SessionEngine>>>>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        behavior_repo: Arc<dyn BehaviorStateRepository>,
        search_repo: Arc<dyn SearchStateRepository>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            catalog,
            behavior_repo,
            search_repo,
            session_config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn session(&self, user_key: &str) -> Result<Arc<SessionEngine>, ApiError> {
        if let Some(session) = self.sessions.read().await.get(user_key) {
            return Ok(Arc::clone(session));
        }

        let behavior = self.behavior_repo.load(user_key).await.map_err(ApiError::repository)?;
        let search = self.search_repo.load(user_key).await.map_err(ApiError::repository)?;

        let mut sessions = self.sessions.write().await;
        // Another request may have raced us here; keep the existing session.
        if let Some(session) = sessions.get(user_key) {
            return Ok(Arc::clone(session));
        }

        let session = Arc::new(SessionEngine::new(
            Arc::clone(&self.catalog),
            self.session_config.clone(),
        ));
        session.restore(behavior, search).await;
        sessions.insert(user_key.to_string(), Arc::clone(&session));
        Ok(session)
    }

    async fn catalog_snapshot(&self) -> Result<Vec<Product>, ApiError> {
        self.catalog.snapshot().await.map_err(|error| {
            ApiError::from_application(ApplicationError::Catalog(error.to_string()))
        })
    }
}

pub struct ApiError(InterfaceError);

impl ApiError {
    fn from_application(error: ApplicationError) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        error!(%correlation_id, %error, "request failed");
        Self(error.into_interface(correlation_id))
    }

    fn repository(error: RepositoryError) -> Self {
        Self::from_application(ApplicationError::Persistence(error.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    correlation_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let correlation_id = match &self.0 {
            InterfaceError::BadRequest { correlation_id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id, .. }
            | InterfaceError::Internal { correlation_id, .. } => correlation_id.clone(),
        };
        let body = ErrorBody { error: self.0.user_message(), correlation_id };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sessions/{user}/events/view", post(track_view))
        .route("/sessions/{user}/events/click", post(track_click))
        .route("/sessions/{user}/events/purchase", post(track_purchase))
        .route("/sessions/{user}/wishlist/{product_id}", post(toggle_wishlist))
        .route("/sessions/{user}/recommendations", get(recommendations))
        .route("/sessions/{user}/similar/{product_id}", get(similar))
        .route("/sessions/{user}/search", post(search))
        .route("/sessions/{user}/suggestions", get(suggestions))
        .route("/sessions/{user}/state", get(session_state))
        .route("/sessions/{user}/save", post(save))
        .route("/sessions/{user}/history", delete(clear_history))
        .route("/sessions/{user}/behavior", delete(clear_behavior))
        .with_state(state)
}

#[derive(Deserialize)]
struct ViewEvent {
    product_id: String,
    #[serde(default)]
    duration_secs: f64,
}

async fn track_view(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(event): Json<ViewEvent>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&user).await?;
    session.track_view(ProductId::new(event.product_id), event.duration_secs).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct ClickEvent {
    product_id: String,
    click_type: String,
}

async fn track_click(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(event): Json<ClickEvent>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&user).await?;
    session.track_click(ProductId::new(event.product_id), event.click_type).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct PurchaseEvent {
    product_id: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

async fn track_purchase(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(event): Json<PurchaseEvent>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&user).await?;
    session.track_purchase(ProductId::new(event.product_id), event.quantity).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
struct WishlistResponse {
    added: bool,
}

async fn toggle_wishlist(
    State(state): State<AppState>,
    Path((user, product_id)): Path<(String, String)>,
) -> Result<Json<WishlistResponse>, ApiError> {
    let session = state.session(&user).await?;
    let added = session.toggle_wishlist(ProductId::new(product_id)).await;
    Ok(Json(WishlistResponse { added }))
}

async fn recommendations(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<RecommendationSet>, ApiError> {
    let session = state.session(&user).await?;
    let catalog = state.catalog_snapshot().await?;

    session.generate_personalized_recommendations(&catalog).await;
    session.generate_trending_recommendations(&catalog).await;
    session.generate_frequently_bought(&catalog).await;

    Ok(Json(session.recommendations().await))
}

async fn similar(
    State(state): State<AppState>,
    Path((user, product_id)): Path<(String, String)>,
) -> Result<Json<Vec<RecommendationItem>>, ApiError> {
    let session = state.session(&user).await?;
    let catalog = state.catalog_snapshot().await?;
    let items = session.get_similar_products(&ProductId::new(product_id), &catalog).await;
    Ok(Json(items))
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default)]
    filters: Option<FilterPatch>,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<Product>,
}

async fn search(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let session = state.session(&user).await?;
    let results = session.perform_search(request.query, request.filters).await;
    Ok(Json(SearchResponse { results }))
}

#[derive(Deserialize)]
struct SuggestionQuery {
    q: String,
}

async fn suggestions(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let session = state.session(&user).await?;
    Ok(Json(session.suggest(&query.q).await))
}

async fn session_state(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<SearchState>, ApiError> {
    let session = state.session(&user).await?;
    Ok(Json(session.search_state().await))
}

async fn save(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&user).await?;

    let behavior = session.behavior_snapshot().await;
    let search = session.search_snapshot().await;

    state.behavior_repo.save(&user, &behavior).await.map_err(ApiError::repository)?;
    state.search_repo.save(&user, &search).await.map_err(ApiError::repository)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_history(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&user).await?;
    session.clear_search_history().await;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_behavior(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&user).await?;
    session.clear_all_behavior_data().await;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use vitrine_core::StaticCatalog;
    use vitrine_db::fixtures;
    use vitrine_db::{InMemoryBehaviorStateRepository, InMemorySearchStateRepository};

    use super::*;

    fn test_state() -> AppState {
        let config = SessionConfig {
            search_latency: std::time::Duration::ZERO,
            suggestion_cache_ttl: std::time::Duration::from_secs(300),
        };
        AppState::new(
            Arc::new(StaticCatalog::new(fixtures::demo_catalog())),
            Arc::new(InMemoryBehaviorStateRepository::default()),
            Arc::new(InMemorySearchStateRepository::default()),
            config,
        )
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn view_events_are_accepted() {
        let app = router(test_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/sessions/u1/events/view",
                serde_json::json!({"product_id": "1", "duration_secs": 12.5}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn search_returns_matching_products() {
        let app = router(test_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/sessions/u1/search",
                serde_json::json!({"query": "laptop"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let results = body["results"].as_array().expect("results");
        assert!(!results.is_empty());
        for result in results {
            let text = format!(
                "{} {} {}",
                result["name"], result["description"], result["category"]
            )
            .to_lowercase();
            assert!(text.contains("laptop"));
        }
    }

    #[tokio::test]
    async fn recommendations_reflect_tracked_views() {
        let state = test_state();
        let app = router(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/sessions/u1/events/view",
                serde_json::json!({"product_id": "1", "duration_secs": 30.0}),
            ))
            .await
            .expect("view response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sessions/u1/recommendations")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(!body["personalized"].as_array().expect("personalized").is_empty());
        assert!(!body["trending"].as_array().expect("trending").is_empty());
    }

    #[tokio::test]
    async fn save_then_fresh_state_restores_history() {
        let state = test_state();
        let app = router(state.clone());

        app.clone()
            .oneshot(json_request(
                "POST",
                "/sessions/u1/search",
                serde_json::json!({"query": "headphones"}),
            ))
            .await
            .expect("search");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/sessions/u1/save")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("save");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // New session map, same repositories.
        let fresh = AppState::new(
            Arc::clone(&state.catalog),
            Arc::clone(&state.behavior_repo),
            Arc::clone(&state.search_repo),
            state.session_config.clone(),
        );
        let response = router(fresh)
            .oneshot(
                Request::builder()
                    .uri("/sessions/u1/state")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("state response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["recent_searches"][0], "headphones");
    }

    #[tokio::test]
    async fn suggestions_endpoint_matches_catalog_names() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sessions/u1/suggestions?q=aurora")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let suggestions = body.as_array().expect("suggestions");
        assert!(suggestions.iter().any(|s| s.as_str().unwrap().contains("Aurora")));
    }

    #[tokio::test]
    async fn clear_behavior_resets_recommendations() {
        let app = router(test_state());

        app.clone()
            .oneshot(json_request(
                "POST",
                "/sessions/u1/events/view",
                serde_json::json!({"product_id": "1", "duration_secs": 30.0}),
            ))
            .await
            .expect("view");
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/sessions/u1/behavior")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("clear");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sessions/u1/recommendations")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("recommendations");
        let body = body_json(response).await;
        assert!(body["personalized"].as_array().expect("personalized").is_empty());
    }
}
