//! "Similar products" query anchored on a single catalog product.

use std::collections::HashSet;

use crate::domain::product::{Product, ProductId};

use super::similarity::SimilarityScorer;
use super::{RecommendationItem, RecommendationReason, MAX_SIMILAR, MIN_SIMILARITY_SCORE};

/// Score every other catalog product against the anchor; unknown anchors
/// yield an empty list, never an error. Threshold 0.3, best first, top 6.
pub fn similar_to(
    anchor_id: &ProductId,
    catalog: &[Product],
    scorer: &SimilarityScorer,
) -> Vec<RecommendationItem> {
    if !catalog.iter().any(|product| &product.id == anchor_id) {
        return Vec::new();
    }

    let reference: HashSet<ProductId> = HashSet::from([anchor_id.clone()]);

    let mut items: Vec<RecommendationItem> = catalog
        .iter()
        .filter(|product| &product.id != anchor_id)
        .filter_map(|product| {
            let score = scorer.score(product, &reference, catalog);
            (score > MIN_SIMILARITY_SCORE).then(|| RecommendationItem {
                product: product.clone(),
                score,
                reason: RecommendationReason::SimilarToInterests,
            })
        })
        .collect();

    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    items.truncate(MAX_SIMILAR);
    items
}
