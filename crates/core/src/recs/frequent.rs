//! "Frequently bought together" recommendations anchored on the user's
//! purchase history.

use crate::domain::behavior::BehaviorProfile;
use crate::domain::product::Product;

use super::similarity::SimilarityScorer;
use super::{
    RecommendationItem, RecommendationReason, MAX_FREQUENTLY_BOUGHT, MIN_SIMILARITY_SCORE,
};

/// Score non-purchased catalog products against the purchased set; threshold
/// 0.3, best first, top 6. Empty when nothing has been purchased.
pub fn recommend(
    profile: &BehaviorProfile,
    catalog: &[Product],
    scorer: &SimilarityScorer,
) -> Vec<RecommendationItem> {
    let purchased: std::collections::HashSet<_> = profile.purchased.keys().cloned().collect();
    if purchased.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<RecommendationItem> = catalog
        .iter()
        .filter(|product| !purchased.contains(&product.id))
        .filter_map(|product| {
            let score = scorer.score(product, &purchased, catalog);
            (score > MIN_SIMILARITY_SCORE).then(|| RecommendationItem {
                product: product.clone(),
                score,
                reason: RecommendationReason::FrequentlyBought,
            })
        })
        .collect();

    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    items.truncate(MAX_FREQUENTLY_BOUGHT);
    items
}
