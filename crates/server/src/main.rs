mod api;
mod bootstrap;
mod health;

use std::sync::Arc;

use anyhow::Result;

use vitrine_core::config::{AppConfig, LoadOptions};
use vitrine_core::session::SessionConfig;
use vitrine_db::{SqlBehaviorStateRepository, SqlSearchStateRepository};

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use vitrine_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let state = api::AppState::new(
        Arc::clone(&app.catalog),
        Arc::new(SqlBehaviorStateRepository::new(app.db_pool.clone())),
        Arc::new(SqlSearchStateRepository::new(app.db_pool.clone())),
        SessionConfig::from(&app.config.engine),
    );
    let router = api::router(state).merge(health::router(app.db_pool.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(event_name = "system.server.started", bind_address = %address, "vitrine-server started");

    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(event_name = "system.server.stopping", "vitrine-server stopping");
    Ok(())
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
