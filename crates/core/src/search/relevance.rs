//! Weighted relevance scoring for free-text catalog search.

use crate::domain::product::Product;

/// Field weights. Feature matches are cumulative across all matching
/// features; the exact-name bonus is additive on top of the name substring
/// bonus.
const NAME_WEIGHT: f64 = 10.0;
const BRAND_WEIGHT: f64 = 8.0;
const CATEGORY_WEIGHT: f64 = 6.0;
const FEATURE_WEIGHT: f64 = 3.0;
const DESCRIPTION_WEIGHT: f64 = 2.0;
const EXACT_NAME_BONUS: f64 = 15.0;

/// Case-insensitive weighted substring relevance. Empty queries score 0.
pub fn score(product: &Product, query: &str) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    let query = query.to_lowercase();
    let mut score = 0.0;

    let name = product.name.to_lowercase();
    if name.contains(&query) {
        score += NAME_WEIGHT;
    }

    if let Some(brand) = &product.brand {
        if brand.to_lowercase().contains(&query) {
            score += BRAND_WEIGHT;
        }
    }

    if product.category.to_lowercase().contains(&query) {
        score += CATEGORY_WEIGHT;
    }

    for feature in &product.features {
        if feature.to_lowercase().contains(&query) {
            score += FEATURE_WEIGHT;
        }
    }

    if product.description.to_lowercase().contains(&query) {
        score += DESCRIPTION_WEIGHT;
    }

    // Kept as a separate branch: the exact bonus stacks on the substring one.
    if name == query {
        score += EXACT_NAME_BONUS;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductId;

    fn product(name: &str, category: &str, brand: Option<&str>, features: &[&str], description: &str) -> Product {
        Product {
            id: ProductId::new("p"),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            brand: brand.map(str::to_string),
            price: 10.0,
            rating: 4.0,
            reviews: 0,
            features: features.iter().map(|f| f.to_string()).collect(),
            in_stock: true,
        }
    }

    #[test]
    fn empty_query_scores_zero() {
        let p = product("MacBook Pro", "laptop", Some("Apple"), &["retina"], "A laptop");
        assert_eq!(score(&p, ""), 0.0);
    }

    // Worked scenario: "laptop" against a product whose category alone
    // matches scores exactly the category weight.
    #[test]
    fn category_only_match_scores_six() {
        let p = product("MacBook Pro 16\"", "laptop", None, &[], "");
        assert!((score(&p, "laptop") - 6.0).abs() < 1e-9);
    }

    #[test]
    fn exact_name_stacks_with_substring_bonus() {
        let p = product("AirPods", "audio", None, &[], "");
        // Substring +10 plus exact +15.
        assert!((score(&p, "airpods") - 25.0).abs() < 1e-9);
    }

    #[test]
    fn feature_matches_are_cumulative() {
        let p = product("Headset", "audio", None, &["noise cancelling", "noise isolation"], "");
        assert!((score(&p, "noise") - 6.0).abs() < 1e-9);
    }

    #[test]
    fn more_matching_fields_never_lower_the_score() {
        let base = product("Widget", "gadgets", None, &[], "");
        let richer = product("Widget", "gadgets", Some("widget co"), &["widget mount"], "a widget");
        assert!(score(&richer, "widget") >= score(&base, "widget"));
    }

    #[test]
    fn all_fields_sum() {
        let p = product(
            "Acme Speaker",
            "speaker systems",
            Some("Acme Speakers"),
            &["speakerphone"],
            "A great speaker",
        );
        // name 10 + brand 8 + category 6 + one feature 3 + description 2.
        assert!((score(&p, "speaker") - 29.0).abs() < 1e-9);
    }
}
