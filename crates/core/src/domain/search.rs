//! Search query, filter, and session-state types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::product::Product;

/// Most-recent-first deduplicated recent searches kept per session.
pub const RECENT_SEARCHES_CAP: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0.0, max: f64::MAX }
    }
}

impl PriceRange {
    /// Inclusive on both ends.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

/// Structured filter set applied by the search pipeline. `features` and
/// `colors` are carried for the UI but the pipeline does not filter on them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_range: PriceRange,
    pub min_rating: f64,
    pub availability: Availability,
    pub sort_by: SortBy,
    pub features: HashSet<String>,
    pub colors: HashSet<String>,
}

/// Partial filter update; `None` fields leave the current value untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FilterPatch {
    pub category: Option<Option<String>>,
    pub brand: Option<Option<String>>,
    pub price_range: Option<PriceRange>,
    pub min_rating: Option<f64>,
    pub availability: Option<Availability>,
    pub sort_by: Option<SortBy>,
    pub features: Option<HashSet<String>>,
    pub colors: Option<HashSet<String>>,
}

impl SearchFilters {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = price_range;
        }
        if let Some(min_rating) = patch.min_rating {
            self.min_rating = min_rating;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(features) = patch.features {
            self.features = features;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
    }
}

/// Per-session search state. `is_searching` and `show_suggestions` are
/// transient and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub filters: SearchFilters,
    pub results: Vec<Product>,
    pub suggestions: Vec<String>,
    pub recent_searches: Vec<String>,
    #[serde(skip)]
    pub is_searching: bool,
    #[serde(skip)]
    pub show_suggestions: bool,
}

impl SearchState {
    /// Push a term to the front of the recent-search list, deduplicating by
    /// exact term and capping at [`RECENT_SEARCHES_CAP`].
    pub fn remember_search(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.recent_searches.retain(|existing| existing != term);
        self.recent_searches.insert(0, term.to_string());
        self.recent_searches.truncate(RECENT_SEARCHES_CAP);
    }
}
