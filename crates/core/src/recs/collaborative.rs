//! Collaborative-style recommendations: unseen catalog products scored
//! against everything the user has interacted with.

use crate::domain::behavior::BehaviorProfile;
use crate::domain::product::Product;

use super::similarity::SimilarityScorer;
use super::{RecommendationItem, RecommendationReason, MAX_COLLABORATIVE, MIN_SIMILARITY_SCORE};

/// Score every catalog product the user has not interacted with against the
/// interacted set; keep scores above the threshold, best first, top 10.
pub fn recommend(
    profile: &BehaviorProfile,
    catalog: &[Product],
    scorer: &SimilarityScorer,
) -> Vec<RecommendationItem> {
    let exclude = profile.interacted_ids();
    if exclude.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<RecommendationItem> = catalog
        .iter()
        .filter(|product| !exclude.contains(&product.id))
        .filter_map(|product| {
            let score = scorer.score(product, &exclude, catalog);
            (score > MIN_SIMILARITY_SCORE).then(|| RecommendationItem {
                product: product.clone(),
                score,
                reason: RecommendationReason::SimilarToInterests,
            })
        })
        .collect();

    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    items.truncate(MAX_COLLABORATIVE);
    items
}
