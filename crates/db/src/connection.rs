//! SQLite pool construction from the application's database settings.

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use vitrine_core::config::DatabaseConfig;

pub type DbPool = sqlx::SqlitePool;

/// Opens a pool against `settings.url` with the session-state pragmas applied
/// to every connection. Zero-valued settings are lifted to the smallest usable
/// ones; `timeout_secs` bounds both pool acquisition and the SQLite busy wait.
pub async fn connect(settings: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let timeout_secs = settings.timeout_secs.max(1);
    let busy_timeout_ms = timeout_secs.saturating_mul(1000);

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(timeout_secs))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
                sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
                sqlx::query(&format!("PRAGMA busy_timeout = {busy_timeout_ms}"))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&settings.url)
        .await
}
