use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog product. Owned by the external catalog provider; the engine only
/// ever reads these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: Option<String>,
    /// Unit price, >= 0.
    pub price: f64,
    /// Average review rating, 0.0..=5.0.
    pub rating: f64,
    /// Review count.
    pub reviews: u32,
    pub features: Vec<String>,
    pub in_stock: bool,
}

impl Product {
    /// Ordering used by the "newest" sort: ids compare numerically when both
    /// parse as integers, lexically otherwise.
    pub fn compare_ids(a: &ProductId, b: &ProductId) -> std::cmp::Ordering {
        match (a.0.parse::<u64>(), b.0.parse::<u64>()) {
            (Ok(left), Ok(right)) => left.cmp(&right),
            _ => a.0.cmp(&b.0),
        }
    }
}
