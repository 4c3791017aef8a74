use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Why a product was recommended. Fixed set of explanation tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    SimilarToInterests,
    MatchesPreferences,
    Trending,
    FrequentlyBought,
}

impl RecommendationReason {
    /// Human-readable label shown next to the recommendation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SimilarToInterests => "Similar to your interests",
            Self::MatchesPreferences => "Matches your preferences",
            Self::Trending => "Trending now",
            Self::FrequentlyBought => "Frequently bought together",
        }
    }
}

/// A ranked recommendation. The score is an unnormalized heuristic used for
/// relative ordering, not a probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub product: Product,
    pub score: f64,
    pub reason: RecommendationReason,
}

/// All recommendation lists a session keeps around for display/persistence.
/// Lists are recomputed on demand, never incrementally maintained.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub personalized: Vec<RecommendationItem>,
    pub trending: Vec<RecommendationItem>,
    pub similar: Vec<RecommendationItem>,
    pub frequently_bought: Vec<RecommendationItem>,
}

/// Display-only confidence estimate for the personalized list. Not used in
/// any further scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub is_trained: bool,
    pub confidence: f64,
    pub last_updated: Option<DateTime<Utc>>,
}
