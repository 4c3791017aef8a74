//! Boundary to the external catalog provider.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::Product;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the full in-memory catalog snapshot on demand. No pagination or
/// streaming contract is assumed.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn snapshot(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Fixed catalog, used by tests and the demo commands.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn snapshot(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}
