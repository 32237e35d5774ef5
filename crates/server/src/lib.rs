pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod sample;
pub mod state;

use self::config::AppConfig;
use self::state::build_app_state;
use std::path::Path;
use tracing::{debug, info};

/// The main entry point for running the server on an already-bound listener.
pub async fn run(listener: tokio::net::TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    sample::ensure_sample_db(Path::new(&config.sample_db_path)).await?;

    let app_state = build_app_state(config)?;
    let app = router::create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
