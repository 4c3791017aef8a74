//! Recommendation stack: similarity scoring, preference aggregation, the
//! collaborative/content-based recommenders, hybrid blending, and the
//! catalog-only trending and similar-products queries.

pub mod collaborative;
pub mod content;
pub mod frequent;
pub mod hybrid;
pub mod preferences;
pub mod similar;
pub mod similarity;
pub mod trending;
mod types;

pub use similarity::{SimilarityScorer, SimilarityWeights};
pub use types::*;

/// Minimum similarity score for collaborative and similar-products candidates.
pub const MIN_SIMILARITY_SCORE: f64 = 0.3;

/// Minimum preference-match score for content-based candidates.
pub const MIN_PREFERENCE_SCORE: f64 = 0.4;

/// Result caps per list.
pub const MAX_COLLABORATIVE: usize = 10;
pub const MAX_CONTENT_BASED: usize = 8;
pub const MAX_HYBRID: usize = 12;
pub const MAX_TRENDING: usize = 8;
pub const MAX_SIMILAR: usize = 6;
pub const MAX_FREQUENTLY_BOUGHT: usize = 6;

/// Trending only considers products rated at least this highly.
pub const TRENDING_MIN_RATING: f64 = 4.0;

/// Model-confidence estimate: per-result increment and display cap.
pub const CONFIDENCE_PER_RESULT: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.9;
