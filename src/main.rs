use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use sancta::core::config::AppConfig;
use sancta::history::eviction;
use sancta::server::router::router;
use sancta::state::AppState;
use sancta::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = env::var("SANCTA_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    logging::init(config.log_dir.as_deref());

    let sweep_period = Duration::from_secs(config.retention.sweep_interval_secs);
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::initialize(config).await?;

    eviction::spawn_sweep(state.conversations.clone(), sweep_period);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
