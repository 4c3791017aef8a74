//! The synchronous filter/sort pipeline over the in-memory catalog snapshot.
//! No pagination and no index; realistic catalogs are small.

use crate::domain::product::Product;
use crate::domain::search::{Availability, SearchFilters, SortBy};

use super::relevance;

/// Filter then sort the catalog. Steps run in a fixed order, although the
/// surviving set is invariant to it; only the final sort depends on mode.
pub fn run(catalog: &[Product], query: &str, filters: &SearchFilters) -> Vec<Product> {
    let query_lower = query.trim().to_lowercase();

    let mut results: Vec<Product> = catalog
        .iter()
        .filter(|product| matches_query(product, &query_lower))
        .filter(|product| matches_category(product, filters))
        .filter(|product| matches_brand(product, filters))
        .filter(|product| filters.price_range.contains(product.price))
        .filter(|product| filters.min_rating <= 0.0 || product.rating >= filters.min_rating)
        .filter(|product| {
            filters.availability != Availability::InStock || product.in_stock
        })
        .cloned()
        .collect();

    sort(&mut results, &query_lower, filters.sort_by);
    results
}

fn matches_query(product: &Product, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(query_lower)
        || product.category.to_lowercase().contains(query_lower)
        || product
            .brand
            .as_ref()
            .is_some_and(|brand| brand.to_lowercase().contains(query_lower))
        || product.description.to_lowercase().contains(query_lower)
        || product.features.iter().any(|feature| feature.to_lowercase().contains(query_lower))
}

fn matches_category(product: &Product, filters: &SearchFilters) -> bool {
    match &filters.category {
        Some(category) => product.category.to_lowercase() == category.to_lowercase(),
        None => true,
    }
}

fn matches_brand(product: &Product, filters: &SearchFilters) -> bool {
    match &filters.brand {
        Some(brand) => product
            .brand
            .as_ref()
            .is_some_and(|product_brand| product_brand.to_lowercase() == brand.to_lowercase()),
        None => true,
    }
}

fn sort(results: &mut [Product], query_lower: &str, sort_by: SortBy) {
    match sort_by {
        SortBy::PriceLow => {
            results.sort_by(|a, b| {
                a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortBy::PriceHigh => {
            results.sort_by(|a, b| {
                b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortBy::Rating => {
            results.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortBy::Newest => {
            results.sort_by(|a, b| Product::compare_ids(&b.id, &a.id));
        }
        SortBy::Relevance => {
            results.sort_by(|a, b| {
                relevance::score(b, query_lower)
                    .partial_cmp(&relevance::score(a, query_lower))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductId;
    use crate::domain::search::PriceRange;

    fn product(id: &str, name: &str, category: &str, brand: Option<&str>, price: f64, rating: f64, in_stock: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            brand: brand.map(str::to_string),
            price,
            rating,
            reviews: 0,
            features: Vec::new(),
            in_stock,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Studio Headphones", "audio", Some("Acme"), 120.0, 4.5, true),
            product("2", "Desk Lamp", "lighting", Some("Lumo"), 35.0, 3.8, true),
            product("3", "Gaming Laptop", "laptop", Some("Nova"), 1500.0, 4.2, false),
            product("4", "Laptop Stand", "accessories", None, 45.0, 4.9, true),
        ]
    }

    #[test]
    fn empty_query_default_filters_return_whole_catalog() {
        let results = run(&catalog(), "", &SearchFilters::default());
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn query_matches_across_fields() {
        let results = run(&catalog(), "laptop", &SearchFilters::default());
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.contains(&"3"));
        assert!(ids.contains(&"4"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn category_filter_is_exact_after_lowercasing() {
        let filters =
            SearchFilters { category: Some("Audio".to_string()), ..SearchFilters::default() };
        let results = run(&catalog(), "", &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "1");
    }

    #[test]
    fn price_range_is_inclusive_on_both_ends() {
        let filters = SearchFilters {
            price_range: PriceRange { min: 35.0, max: 45.0 },
            ..SearchFilters::default()
        };
        let results = run(&catalog(), "", &filters);
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"2"));
        assert!(ids.contains(&"4"));
    }

    #[test]
    fn min_rating_zero_filters_nothing() {
        let filters = SearchFilters { min_rating: 0.0, ..SearchFilters::default() };
        assert_eq!(run(&catalog(), "", &filters).len(), 4);

        let strict = SearchFilters { min_rating: 4.3, ..SearchFilters::default() };
        let results = run(&catalog(), "", &strict);
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"1"));
        assert!(ids.contains(&"4"));
    }

    #[test]
    fn in_stock_filter_drops_unavailable_products() {
        let filters =
            SearchFilters { availability: Availability::InStock, ..SearchFilters::default() };
        let results = run(&catalog(), "", &filters);
        assert!(results.iter().all(|p| p.in_stock));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn price_sorts_work_both_ways() {
        let low = SearchFilters { sort_by: SortBy::PriceLow, ..SearchFilters::default() };
        let results = run(&catalog(), "", &low);
        let prices: Vec<f64> = results.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![35.0, 45.0, 120.0, 1500.0]);

        let high = SearchFilters { sort_by: SortBy::PriceHigh, ..SearchFilters::default() };
        let results = run(&catalog(), "", &high);
        assert_eq!(results[0].price, 1500.0);
    }

    #[test]
    fn newest_sorts_by_descending_numeric_id() {
        let filters = SearchFilters { sort_by: SortBy::Newest, ..SearchFilters::default() };
        let results = run(&catalog(), "", &filters);
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn relevance_sort_puts_best_text_match_first() {
        let results = run(&catalog(), "laptop", &SearchFilters::default());
        // "Gaming Laptop" matches name + category; "Laptop Stand" name only.
        assert_eq!(results[0].id.as_str(), "3");
    }
}
