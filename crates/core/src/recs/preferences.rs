//! Preference aggregation over a user's view/purchase history.
//!
//! Resolves each behavior entry against the catalog and accumulates weighted
//! category and brand affinities, an effective price band, and a weighted
//! average rating. Views weigh `min(count, 5)`; purchases weigh twice their
//! quantity.

use std::collections::HashMap;

use crate::domain::behavior::BehaviorProfile;
use crate::domain::product::Product;

/// How many views of one product cap its contribution.
const VIEW_WEIGHT_CAP: u32 = 5;
/// A purchased unit counts this much more than a view.
const PURCHASE_WEIGHT_FACTOR: f64 = 2.0;

/// Aggregated user preferences. Affinity maps are normalized so the strongest
/// entry is 1.0; `price_band` is `None` until at least one behavior entry
/// resolves against the catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Preferences {
    pub categories: HashMap<String, f64>,
    pub brands: HashMap<String, f64>,
    pub price_band: Option<(f64, f64)>,
    pub avg_rating: f64,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.brands.is_empty() && self.price_band.is_none()
    }
}

/// Aggregate preferences from the profile. Behavior entries whose product id
/// is not in the catalog contribute nothing.
pub fn analyze(profile: &BehaviorProfile, catalog: &[Product]) -> Preferences {
    let by_id: HashMap<_, _> = catalog.iter().map(|product| (&product.id, product)).collect();

    let mut categories: HashMap<String, f64> = HashMap::new();
    let mut brands: HashMap<String, f64> = HashMap::new();
    let mut price_min = f64::INFINITY;
    let mut price_max = f64::NEG_INFINITY;
    let mut rating_sum = 0.0;
    let mut weight_sum = 0.0;

    let mut absorb = |product: &Product, weight: f64| {
        *categories.entry(product.category.clone()).or_insert(0.0) += weight;
        if let Some(brand) = &product.brand {
            *brands.entry(brand.clone()).or_insert(0.0) += weight;
        }
        price_min = price_min.min(product.price);
        price_max = price_max.max(product.price);
        rating_sum += product.rating * weight;
        weight_sum += weight;
    };

    for (product_id, stats) in &profile.viewed {
        if let Some(product) = by_id.get(product_id) {
            absorb(product, f64::from(stats.count.min(VIEW_WEIGHT_CAP)));
        }
    }

    for (product_id, stats) in &profile.purchased {
        if let Some(product) = by_id.get(product_id) {
            absorb(product, PURCHASE_WEIGHT_FACTOR * f64::from(stats.quantity));
        }
    }

    if weight_sum == 0.0 {
        return Preferences::default();
    }

    normalize(&mut categories);
    normalize(&mut brands);

    Preferences {
        categories,
        brands,
        price_band: Some((price_min, price_max)),
        avg_rating: rating_sum / weight_sum,
    }
}

fn normalize(weights: &mut HashMap<String, f64>) {
    let max = weights.values().cloned().fold(0.0f64, f64::max);
    if max > 0.0 {
        for value in weights.values_mut() {
            *value /= max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::BehaviorTracker;
    use crate::domain::product::ProductId;

    fn product(id: &str, category: &str, price: f64, rating: f64, brand: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: category.to_string(),
            brand: brand.map(str::to_string),
            price,
            rating,
            reviews: 10,
            features: Vec::new(),
            in_stock: true,
        }
    }

    #[test]
    fn empty_profile_yields_empty_preferences() {
        let prefs = analyze(&BehaviorProfile::default(), &[product("p1", "audio", 10.0, 4.0, None)]);
        assert!(prefs.is_empty());
        assert_eq!(prefs.avg_rating, 0.0);
    }

    #[test]
    fn unresolvable_behavior_contributes_nothing() {
        let mut tracker = BehaviorTracker::new();
        tracker.track_view(ProductId::new("ghost"), 5.0);

        let prefs = analyze(tracker.profile(), &[product("p1", "audio", 10.0, 4.0, None)]);
        assert!(prefs.is_empty());
    }

    #[test]
    fn strongest_category_normalizes_to_one() {
        let catalog = vec![
            product("p1", "audio", 50.0, 4.0, Some("Acme")),
            product("p2", "video", 80.0, 3.0, None),
        ];

        let mut tracker = BehaviorTracker::new();
        for _ in 0..3 {
            tracker.track_view(ProductId::new("p1"), 10.0);
        }
        tracker.track_view(ProductId::new("p2"), 10.0);

        let prefs = analyze(tracker.profile(), &catalog);
        assert!((prefs.categories["audio"] - 1.0).abs() < 1e-9);
        assert!(prefs.categories["video"] < 1.0);
        assert!((prefs.brands["Acme"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn purchases_outweigh_views() {
        let catalog = vec![
            product("viewed", "audio", 50.0, 4.0, None),
            product("bought", "video", 80.0, 3.0, None),
        ];

        let mut tracker = BehaviorTracker::new();
        tracker.track_view(ProductId::new("viewed"), 10.0);
        tracker.track_purchase(ProductId::new("bought"), 1);

        let prefs = analyze(tracker.profile(), &catalog);
        assert!((prefs.categories["video"] - 1.0).abs() < 1e-9);
        assert!((prefs.categories["audio"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn price_band_spans_engaged_products() {
        let catalog = vec![
            product("cheap", "audio", 10.0, 4.0, None),
            product("dear", "audio", 200.0, 5.0, None),
        ];

        let mut tracker = BehaviorTracker::new();
        tracker.track_view(ProductId::new("cheap"), 1.0);
        tracker.track_view(ProductId::new("dear"), 1.0);

        let prefs = analyze(tracker.profile(), &catalog);
        assert_eq!(prefs.price_band, Some((10.0, 200.0)));
        assert!((prefs.avg_rating - 4.5).abs() < 1e-9);
    }
}
