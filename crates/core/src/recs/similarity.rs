//! Multi-factor product similarity scoring.

use std::collections::HashSet;

use crate::domain::product::{Product, ProductId};

/// Weights for the independent similarity signals. Signals on the same pair
/// sum, so the theoretical max per pair is the sum of all four.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    /// Same category (default: 0.40).
    pub category: f64,
    /// Price within the relative band of the reference (default: 0.30).
    pub price: f64,
    /// Rating within the absolute tolerance (default: 0.20).
    pub rating: f64,
    /// Both branded and brands equal (default: 0.10).
    pub brand: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self { category: 0.40, price: 0.30, rating: 0.20, brand: 0.10 }
    }
}

/// Candidate price must be within this fraction of the reference price.
const PRICE_BAND_RATIO: f64 = 0.20;
/// Candidate rating must be within this many stars of the reference rating.
const RATING_TOLERANCE: f64 = 1.0;

/// Scores one candidate product against a reference product set.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    weights: SimilarityWeights,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: SimilarityWeights) -> Self {
        Self { weights }
    }

    /// Average per-pair similarity of `candidate` against every reference id
    /// that resolves in `catalog`. Returns 0.0 when none resolve. Range is
    /// 0.0..=1.0 with default weights.
    pub fn score(
        &self,
        candidate: &Product,
        reference_ids: &HashSet<ProductId>,
        catalog: &[Product],
    ) -> f64 {
        let references: Vec<&Product> =
            catalog.iter().filter(|product| reference_ids.contains(&product.id)).collect();

        if references.is_empty() {
            return 0.0;
        }

        let total: f64 =
            references.iter().map(|reference| self.pair_score(candidate, reference)).sum();

        total / references.len() as f64
    }

    /// Sum of the independent weighted signals for one candidate/reference pair.
    fn pair_score(&self, candidate: &Product, reference: &Product) -> f64 {
        let mut score = 0.0;

        if candidate.category == reference.category {
            score += self.weights.category;
        }

        if reference.price > 0.0
            && (candidate.price - reference.price).abs() / reference.price <= PRICE_BAND_RATIO
        {
            score += self.weights.price;
        }

        if (candidate.rating - reference.rating).abs() <= RATING_TOLERANCE {
            score += self.weights.rating;
        }

        if let (Some(candidate_brand), Some(reference_brand)) =
            (&candidate.brand, &reference.brand)
        {
            if candidate_brand == reference_brand {
                score += self.weights.brand;
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, price: f64, rating: f64, brand: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: category.to_string(),
            brand: brand.map(str::to_string),
            price,
            rating,
            reviews: 0,
            features: Vec::new(),
            in_stock: true,
        }
    }

    fn refs(ids: &[&str]) -> HashSet<ProductId> {
        ids.iter().map(|id| ProductId::new(*id)).collect()
    }

    #[test]
    fn identical_products_score_one() {
        let reference = product("q", "audio", 100.0, 4.5, Some("Acme"));
        let candidate = product("p", "audio", 100.0, 4.5, Some("Acme"));
        let catalog = vec![reference];

        let scorer = SimilarityScorer::new();
        let score = scorer.score(&candidate, &refs(&["q"]), &catalog);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unresolved_references_score_zero() {
        let candidate = product("p", "audio", 100.0, 4.5, None);
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score(&candidate, &refs(&["ghost"]), &[]), 0.0);
    }

    #[test]
    fn price_band_is_relative_to_reference() {
        let reference = product("q", "audio", 100.0, 4.5, None);
        let catalog = vec![reference];
        let scorer = SimilarityScorer::new();

        // 120 is exactly 20% above the reference: inside the band.
        let near = product("p", "video", 120.0, 0.0, None);
        assert!((scorer.score(&near, &refs(&["q"]), &catalog) - 0.3).abs() < 1e-9);

        let far = product("p", "video", 121.0, 0.0, None);
        assert_eq!(scorer.score(&far, &refs(&["q"]), &catalog), 0.0);
    }

    #[test]
    fn missing_brand_earns_no_brand_signal() {
        let reference = product("q", "video", 500.0, 0.0, None);
        let candidate = product("p", "audio", 10.0, 5.0, Some("Acme"));
        let catalog = vec![reference];

        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score(&candidate, &refs(&["q"]), &catalog), 0.0);
    }

    #[test]
    fn scores_average_across_references() {
        // One perfect match and one total miss average to 0.5.
        let exact = product("a", "audio", 100.0, 4.5, Some("Acme"));
        let miss = product("b", "video", 1000.0, 1.0, None);
        let candidate = product("p", "audio", 100.0, 4.5, Some("Acme"));
        let catalog = vec![exact, miss];

        let scorer = SimilarityScorer::new();
        let score = scorer.score(&candidate, &refs(&["a", "b"]), &catalog);
        assert!((score - 0.5).abs() < 1e-9);
    }
}
