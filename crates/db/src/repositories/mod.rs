use async_trait::async_trait;
use thiserror::Error;

use vitrine_core::session::{BehaviorSnapshot, SearchSnapshot};

pub mod memory;
pub mod session_state;

pub use memory::{InMemoryBehaviorStateRepository, InMemorySearchStateRepository};
pub use session_state::{SqlBehaviorStateRepository, SqlSearchStateRepository};

/// Snapshot payload schema version written by this build. Loads refuse
/// payloads written under a newer version.
pub const SNAPSHOT_SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unsupported snapshot schema version {0}")]
    UnsupportedSchemaVersion(i64),
}

#[async_trait]
pub trait BehaviorStateRepository: Send + Sync {
    async fn load(&self, user_key: &str) -> Result<Option<BehaviorSnapshot>, RepositoryError>;
    async fn save(&self, user_key: &str, snapshot: &BehaviorSnapshot)
        -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait SearchStateRepository: Send + Sync {
    async fn load(&self, user_key: &str) -> Result<Option<SearchSnapshot>, RepositoryError>;
    async fn save(&self, user_key: &str, snapshot: &SearchSnapshot)
        -> Result<(), RepositoryError>;
}
