//! Per-user interaction history: views, purchases, wishlist, searches, clicks.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// Most recent search records kept per profile; oldest evicted first.
pub const SEARCH_HISTORY_CAP: usize = 50;
/// Most recent click records kept per profile; oldest evicted first.
pub const CLICK_PATTERN_CAP: usize = 100;

/// Aggregated view stats for one product. One entry per product id; `count`
/// only ever increments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewStats {
    pub count: u32,
    /// Accumulated dwell time in seconds.
    pub total_time_secs: f64,
    pub first_viewed: DateTime<Utc>,
    pub last_viewed: DateTime<Utc>,
}

/// Aggregated purchase stats for one product; quantity accumulates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseStats {
    pub quantity: u32,
    pub first_purchased: DateTime<Utc>,
    pub last_purchased: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub term: String,
    pub matched: Vec<ProductId>,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub product_id: ProductId,
    /// Click surface as reported by the UI, passed through verbatim.
    pub click_type: String,
    pub at: DateTime<Utc>,
    pub session_id: String,
}

/// One user's interaction history. Created empty at session start (or
/// rehydrated from a persisted snapshot) and mutated only through the
/// tracker; never destroyed except by an explicit clear.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub viewed: HashMap<ProductId, ViewStats>,
    pub purchased: HashMap<ProductId, PurchaseStats>,
    pub wishlist: HashSet<ProductId>,
    pub search_history: VecDeque<SearchRecord>,
    pub click_patterns: VecDeque<ClickRecord>,
}

impl BehaviorProfile {
    /// Every product id the user has interacted with: viewed, purchased, or
    /// wishlisted.
    pub fn interacted_ids(&self) -> HashSet<ProductId> {
        self.viewed
            .keys()
            .chain(self.purchased.keys())
            .chain(self.wishlist.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.viewed.is_empty()
            && self.purchased.is_empty()
            && self.wishlist.is_empty()
            && self.search_history.is_empty()
            && self.click_patterns.is_empty()
    }
}
