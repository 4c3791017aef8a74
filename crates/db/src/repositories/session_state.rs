//! SQLite-backed session state repositories.
//!
//! Snapshots are stored as one JSON payload per user key, stamped with the
//! schema version that wrote them. Older versions would be migrated here as
//! the schema evolves; newer versions are rejected on load.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::Row;

use vitrine_core::session::{BehaviorSnapshot, SearchSnapshot};

use super::{
    BehaviorStateRepository, RepositoryError, SearchStateRepository, SNAPSHOT_SCHEMA_VERSION,
};
use crate::DbPool;

pub struct SqlBehaviorStateRepository {
    pool: DbPool,
}

impl SqlBehaviorStateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BehaviorStateRepository for SqlBehaviorStateRepository {
    async fn load(&self, user_key: &str) -> Result<Option<BehaviorSnapshot>, RepositoryError> {
        load_snapshot(&self.pool, "behavior_state", user_key).await
    }

    async fn save(
        &self,
        user_key: &str,
        snapshot: &BehaviorSnapshot,
    ) -> Result<(), RepositoryError> {
        save_snapshot(&self.pool, "behavior_state", user_key, snapshot).await
    }
}

pub struct SqlSearchStateRepository {
    pool: DbPool,
}

impl SqlSearchStateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchStateRepository for SqlSearchStateRepository {
    async fn load(&self, user_key: &str) -> Result<Option<SearchSnapshot>, RepositoryError> {
        load_snapshot(&self.pool, "search_state", user_key).await
    }

    async fn save(&self, user_key: &str, snapshot: &SearchSnapshot) -> Result<(), RepositoryError> {
        save_snapshot(&self.pool, "search_state", user_key, snapshot).await
    }
}

async fn load_snapshot<T: DeserializeOwned>(
    pool: &DbPool,
    table: &str,
    user_key: &str,
) -> Result<Option<T>, RepositoryError> {
    let query =
        format!("SELECT schema_version, payload FROM {table} WHERE user_key = ?");
    let row = sqlx::query(&query).bind(user_key).fetch_optional(pool).await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let schema_version = row.get::<i64, _>("schema_version");
    if schema_version > SNAPSHOT_SCHEMA_VERSION {
        return Err(RepositoryError::UnsupportedSchemaVersion(schema_version));
    }

    let payload = row.get::<String, _>("payload");
    let snapshot = serde_json::from_str(&payload)
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;
    Ok(Some(snapshot))
}

async fn save_snapshot<T: Serialize>(
    pool: &DbPool,
    table: &str,
    user_key: &str,
    snapshot: &T,
) -> Result<(), RepositoryError> {
    let payload = serde_json::to_string(snapshot)
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;

    let query = format!(
        "INSERT INTO {table} (user_key, schema_version, payload, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT (user_key) DO UPDATE SET
             schema_version = excluded.schema_version,
             payload = excluded.payload,
             updated_at = excluded.updated_at"
    );
    sqlx::query(&query)
        .bind(user_key)
        .bind(SNAPSHOT_SCHEMA_VERSION)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    Ok(())
}
