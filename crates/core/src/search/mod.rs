//! Catalog search: weighted relevance scoring, the filter/sort pipeline, and
//! autocomplete suggestions.

pub mod pipeline;
pub mod relevance;
pub mod suggestions;

pub use suggestions::SuggestionEngine;
