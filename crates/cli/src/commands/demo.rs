//! Deterministic walkthrough of the personalization loop over the demo
//! catalog: track a few events, search, then show each recommendation list.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::commands::CommandResult;
use vitrine_core::domain::product::ProductId;
use vitrine_core::session::{SessionConfig, SessionEngine};
use vitrine_core::StaticCatalog;
use vitrine_db::fixtures;

#[derive(Debug, Serialize)]
struct DemoItem {
    product: String,
    score: f64,
    reason: String,
}

#[derive(Debug, Serialize)]
struct DemoReport {
    command: &'static str,
    status: &'static str,
    search_query: String,
    search_result_count: usize,
    suggestions: Vec<String>,
    personalized: Vec<DemoItem>,
    trending: Vec<DemoItem>,
    similar_to_first_view: Vec<DemoItem>,
    model_confidence: f64,
}

pub fn run() -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "demo",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let report = runtime.block_on(walkthrough());
    match serde_json::to_string_pretty(&report) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure("demo", "serialization", error.to_string(), 1),
    }
}

async fn walkthrough() -> DemoReport {
    let catalog = fixtures::demo_catalog();
    let config = SessionConfig {
        search_latency: Duration::ZERO,
        suggestion_cache_ttl: Duration::from_secs(300),
    };
    let session = SessionEngine::new(Arc::new(StaticCatalog::new(catalog.clone())), config);

    let first_viewed = ProductId::new("1");
    session.track_view(first_viewed.clone(), 42.0).await;
    session.track_view(ProductId::new("4"), 18.0).await;
    session.track_purchase(ProductId::new("7"), 1).await;
    session.toggle_wishlist(ProductId::new("11")).await;

    let query = "laptop".to_string();
    let results = session.perform_search(query.clone(), None).await;
    let suggestions = session.suggest("au").await;

    let personalized = session.generate_personalized_recommendations(&catalog).await;
    let trending = session.generate_trending_recommendations(&catalog).await;
    let similar = session.get_similar_products(&first_viewed, &catalog).await;
    let model = session.model_state().await;

    DemoReport {
        command: "demo",
        status: "ok",
        search_query: query,
        search_result_count: results.len(),
        suggestions,
        personalized: to_items(personalized),
        trending: to_items(trending),
        similar_to_first_view: to_items(similar),
        model_confidence: model.confidence,
    }
}

fn to_items(items: Vec<vitrine_core::recs::RecommendationItem>) -> Vec<DemoItem> {
    items
        .into_iter()
        .map(|item| DemoItem {
            product: item.product.name,
            score: item.score,
            reason: item.reason.label().to_string(),
        })
        .collect()
}
