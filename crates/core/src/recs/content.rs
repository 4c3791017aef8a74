//! Content-based recommendations: catalog products scored against the
//! aggregated preference profile.

use crate::domain::product::Product;

use super::preferences::Preferences;
use super::{RecommendationItem, RecommendationReason, MAX_CONTENT_BASED, MIN_PREFERENCE_SCORE};

/// Weights for the preference-match signals.
const CATEGORY_WEIGHT: f64 = 0.4;
const PRICE_BAND_BONUS: f64 = 0.3;
const BRAND_WEIGHT: f64 = 0.2;
const RATING_BONUS: f64 = 0.1;

/// Score every catalog product against the preferences; keep scores above the
/// threshold, best first, top 8.
pub fn recommend(preferences: &Preferences, catalog: &[Product]) -> Vec<RecommendationItem> {
    if preferences.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<RecommendationItem> = catalog
        .iter()
        .filter_map(|product| {
            let score = preference_score(preferences, product);
            (score > MIN_PREFERENCE_SCORE).then(|| RecommendationItem {
                product: product.clone(),
                score,
                reason: RecommendationReason::MatchesPreferences,
            })
        })
        .collect();

    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    items.truncate(MAX_CONTENT_BASED);
    items
}

fn preference_score(preferences: &Preferences, product: &Product) -> f64 {
    let mut score = 0.0;

    if let Some(affinity) = preferences.categories.get(&product.category) {
        score += CATEGORY_WEIGHT * affinity;
    }

    if let Some((min, max)) = preferences.price_band {
        if product.price >= min && product.price <= max {
            score += PRICE_BAND_BONUS;
        }
    }

    if let Some(brand) = &product.brand {
        if let Some(affinity) = preferences.brands.get(brand) {
            score += BRAND_WEIGHT * affinity;
        }
    }

    if product.rating >= preferences.avg_rating {
        score += RATING_BONUS;
    }

    score
}
