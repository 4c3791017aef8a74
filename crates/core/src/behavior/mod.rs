//! Interaction tracking over a [`BehaviorProfile`].
//!
//! Every tracking call is an idempotent upsert: a keyed entry is updated in
//! place when present and created otherwise. Calls never fail; negative
//! durations clamp to zero and quantities below one clamp to one at this
//! boundary.

use chrono::Utc;

use crate::domain::behavior::{
    BehaviorProfile, ClickRecord, PurchaseStats, SearchRecord, ViewStats, CLICK_PATTERN_CAP,
    SEARCH_HISTORY_CAP,
};
use crate::domain::product::ProductId;

/// Owns one user's behavior profile and applies tracking mutations to it.
/// Reads made after a call returns always reflect the update.
#[derive(Clone, Debug, Default)]
pub struct BehaviorTracker {
    profile: BehaviorProfile,
}

impl BehaviorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profile(profile: BehaviorProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &BehaviorProfile {
        &self.profile
    }

    pub fn into_profile(self) -> BehaviorProfile {
        self.profile
    }

    pub fn track_view(&mut self, product_id: ProductId, duration_secs: f64) {
        let duration_secs = duration_secs.max(0.0);
        let now = Utc::now();

        self.profile
            .viewed
            .entry(product_id)
            .and_modify(|stats| {
                stats.count += 1;
                stats.total_time_secs += duration_secs;
                stats.last_viewed = now;
            })
            .or_insert(ViewStats {
                count: 1,
                total_time_secs: duration_secs,
                first_viewed: now,
                last_viewed: now,
            });
    }

    pub fn track_click(
        &mut self,
        product_id: ProductId,
        click_type: impl Into<String>,
        session_id: impl Into<String>,
    ) {
        self.profile.click_patterns.push_back(ClickRecord {
            product_id,
            click_type: click_type.into(),
            at: Utc::now(),
            session_id: session_id.into(),
        });

        while self.profile.click_patterns.len() > CLICK_PATTERN_CAP {
            self.profile.click_patterns.pop_front();
        }
    }

    pub fn track_search(&mut self, term: impl Into<String>, matched: Vec<ProductId>) {
        self.profile.search_history.push_back(SearchRecord {
            term: term.into(),
            matched,
            at: Utc::now(),
        });

        while self.profile.search_history.len() > SEARCH_HISTORY_CAP {
            self.profile.search_history.pop_front();
        }
    }

    pub fn track_purchase(&mut self, product_id: ProductId, quantity: u32) {
        let quantity = quantity.max(1);
        let now = Utc::now();

        self.profile
            .purchased
            .entry(product_id)
            .and_modify(|stats| {
                stats.quantity += quantity;
                stats.last_purchased = now;
            })
            .or_insert(PurchaseStats { quantity, first_purchased: now, last_purchased: now });
    }

    /// Returns true when the product is on the wishlist after the call.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        if self.profile.wishlist.remove(&product_id) {
            false
        } else {
            self.profile.wishlist.insert(product_id);
            true
        }
    }

    pub fn clear_search_history(&mut self) {
        self.profile.search_history.clear();
    }

    /// Drops everything. Exposed for testing/reset only.
    pub fn clear_all(&mut self) {
        self.profile = BehaviorProfile::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn repeated_views_accumulate_in_one_entry() {
        let mut tracker = BehaviorTracker::new();
        tracker.track_view(pid("p1"), 10.0);
        tracker.track_view(pid("p1"), 20.0);

        let stats = tracker.profile().viewed.get(&pid("p1")).unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.total_time_secs - 30.0).abs() < f64::EPSILON);
        assert!(stats.last_viewed >= stats.first_viewed);
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let mut tracker = BehaviorTracker::new();
        tracker.track_view(pid("p1"), -5.0);

        let stats = tracker.profile().viewed.get(&pid("p1")).unwrap();
        assert_eq!(stats.total_time_secs, 0.0);
    }

    #[test]
    fn purchase_quantity_accumulates_and_clamps() {
        let mut tracker = BehaviorTracker::new();
        tracker.track_purchase(pid("p1"), 0);
        tracker.track_purchase(pid("p1"), 3);

        let stats = tracker.profile().purchased.get(&pid("p1")).unwrap();
        assert_eq!(stats.quantity, 4);
    }

    #[test]
    fn wishlist_toggle_round_trips() {
        let mut tracker = BehaviorTracker::new();
        assert!(tracker.toggle_wishlist(pid("p1")));
        assert!(tracker.profile().wishlist.contains(&pid("p1")));
        assert!(!tracker.toggle_wishlist(pid("p1")));
        assert!(tracker.profile().wishlist.is_empty());
    }

    #[test]
    fn search_history_evicts_oldest_beyond_cap() {
        let mut tracker = BehaviorTracker::new();
        for i in 0..(SEARCH_HISTORY_CAP + 5) {
            tracker.track_search(format!("term-{i}"), Vec::new());
        }

        let history = &tracker.profile().search_history;
        assert_eq!(history.len(), SEARCH_HISTORY_CAP);
        assert_eq!(history.front().unwrap().term, "term-5");
    }

    #[test]
    fn click_patterns_evict_oldest_beyond_cap() {
        let mut tracker = BehaviorTracker::new();
        for i in 0..(CLICK_PATTERN_CAP + 3) {
            tracker.track_click(pid(&format!("p{i}")), "card", "s1");
        }

        let clicks = &tracker.profile().click_patterns;
        assert_eq!(clicks.len(), CLICK_PATTERN_CAP);
        assert_eq!(clicks.front().unwrap().product_id, pid("p3"));
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut tracker = BehaviorTracker::new();
        tracker.track_view(pid("p1"), 1.0);
        tracker.track_purchase(pid("p2"), 1);
        tracker.toggle_wishlist(pid("p3"));
        tracker.track_search("x", Vec::new());
        tracker.track_click(pid("p1"), "card", "s1");

        tracker.clear_all();
        assert!(tracker.profile().is_empty());
    }
}
