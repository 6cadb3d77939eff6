//! chartlens-api server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chartlens_api::{build_router, AppState};
use chartlens_core::{AnalysisLog, AppConfig, FileAnalysisLog};
use chartlens_inference::{ChartAnalyzer, GeminiBackend, ModelFallbackClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chartlens_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        warn!("GOOGLE_API_KEY not set; /analyze will answer 500 until it is configured");
    }

    let log: Arc<dyn AnalysisLog> = Arc::new(FileAnalysisLog::new(&config.analysis_log_path));
    // The handler refuses requests before reaching the analyzer when the key
    // is missing, so an empty-key backend is never actually called.
    let backend = Arc::new(GeminiBackend::new(
        config.api_key.clone().unwrap_or_default(),
        config.gemini_base_url.clone(),
    ));
    let analyzer: Arc<dyn ChartAnalyzer> =
        Arc::new(ModelFallbackClient::new(backend, config.models.clone(), log));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState {
        config: Arc::new(config),
        analyzer,
    };
    let app = build_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
