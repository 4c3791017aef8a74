//! Hybrid blending of the collaborative and content-based lists.

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::product::ProductId;

use super::{
    ModelState, RecommendationItem, CONFIDENCE_PER_RESULT, MAX_CONFIDENCE, MAX_HYBRID,
};

/// Concatenate both lists, deduplicate by product id keeping the higher score
/// (the first-seen reason tag is retained, not merged), sort descending, and
/// keep the top 12.
pub fn combine(
    a: Vec<RecommendationItem>,
    b: Vec<RecommendationItem>,
) -> Vec<RecommendationItem> {
    let mut by_id: HashMap<ProductId, RecommendationItem> = HashMap::new();

    for item in a.into_iter().chain(b) {
        match by_id.get_mut(&item.product.id) {
            Some(existing) => {
                if item.score > existing.score {
                    existing.score = item.score;
                }
            }
            None => {
                by_id.insert(item.product.id.clone(), item);
            }
        }
    }

    let mut items: Vec<RecommendationItem> = by_id.into_values().collect();
    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    items.truncate(MAX_HYBRID);
    items
}

/// Display-only confidence for a blended list of `result_count` items.
pub fn confidence(result_count: usize) -> f64 {
    (result_count as f64 * CONFIDENCE_PER_RESULT).min(MAX_CONFIDENCE)
}

/// Refresh the display-only model state after a blend.
pub fn refresh_model_state(state: &mut ModelState, result_count: usize) {
    state.is_trained = true;
    state.confidence = confidence(result_count);
    state.last_updated = Some(Utc::now());
}
