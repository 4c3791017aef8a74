//! Trending products: a pure function of the catalog.

use crate::domain::product::Product;

use super::{RecommendationItem, RecommendationReason, MAX_TRENDING, TRENDING_MIN_RATING};

/// Products rated at least 4.0, most-reviewed first, top 8. Ties on review
/// count order by descending product id so the output is stable.
pub fn recommend(catalog: &[Product]) -> Vec<RecommendationItem> {
    let mut trending: Vec<&Product> =
        catalog.iter().filter(|product| product.rating >= TRENDING_MIN_RATING).collect();

    trending.sort_by(|a, b| {
        b.reviews.cmp(&a.reviews).then_with(|| Product::compare_ids(&b.id, &a.id))
    });
    trending.truncate(MAX_TRENDING);

    trending
        .into_iter()
        .map(|product| RecommendationItem {
            product: product.clone(),
            score: f64::from(product.reviews),
            reason: RecommendationReason::Trending,
        })
        .collect()
}
