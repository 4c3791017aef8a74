//! Autocomplete suggestions with a short-lived cache.
//!
//! Lookups are keyed by normalized (trimmed, lower-cased) query text and
//! cached for five minutes by default. Entries are read and written without
//! locks beyond the owner's; staleness is checked on read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::domain::product::Product;

/// Default cache TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
/// Most suggestions returned per lookup.
const MAX_SUGGESTIONS: usize = 8;

struct CacheEntry {
    suggestions: Vec<String>,
    computed_at: Instant,
}

/// Suggestion lookup over a catalog snapshot, with a TTL cache keyed by
/// normalized query text.
pub struct SuggestionEngine {
    ttl: Duration,
    cache: HashMap<String, CacheEntry>,
}

impl SuggestionEngine {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, cache: HashMap::new() }
    }

    /// Suggest completions for `query`: product names first, then categories
    /// and brands, all matched case-insensitively, deduplicated, capped.
    /// Empty (or all-whitespace) queries yield nothing.
    pub fn suggest(&mut self, query: &str, catalog: &[Product]) -> Vec<String> {
        let key = query.trim().to_lowercase();
        if key.is_empty() {
            return Vec::new();
        }

        if let Some(entry) = self.cache.get(&key) {
            if entry.computed_at.elapsed() < self.ttl {
                return entry.suggestions.clone();
            }
        }

        let suggestions = compute_suggestions(&key, catalog);
        self.cache.insert(
            key,
            CacheEntry { suggestions: suggestions.clone(), computed_at: Instant::now() },
        );
        suggestions
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn compute_suggestions(normalized_query: &str, catalog: &[Product]) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    let mut push_unique = |value: &str| {
        if suggestions.len() < MAX_SUGGESTIONS
            && !suggestions.iter().any(|existing| existing.eq_ignore_ascii_case(value))
        {
            suggestions.push(value.to_string());
        }
    };

    for product in catalog {
        if product.name.to_lowercase().contains(normalized_query) {
            push_unique(&product.name);
        }
    }

    for product in catalog {
        if product.category.to_lowercase().contains(normalized_query) {
            push_unique(&product.category);
        }
        if let Some(brand) = &product.brand {
            if brand.to_lowercase().contains(normalized_query) {
                push_unique(brand);
            }
        }
    }

    suggestions
}
