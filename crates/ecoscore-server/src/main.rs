//! EcoScore — product environmental impact scoring server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ecoscore_analysis::{ImpactAnalyzer, LlmConfig};
use ecoscore_server::{build_router, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("ECOSCORE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = ecoscore_core::EcoScoreConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = ecoscore_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let analyzer = match LlmConfig::from_env().resolve_client() {
        Some(client) => {
            info!(
                "LLM provider configured: {} ({})",
                client.provider(),
                client.model()
            );
            ImpactAnalyzer::new(Some(Arc::new(client)))
        }
        None => {
            info!("No LLM provider configured; analyses use the heuristic fallback");
            ImpactAnalyzer::new(None)
        }
    };

    let state = Arc::new(AppState::new(config, store, analyzer));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("EcoScore server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
