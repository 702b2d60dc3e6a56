use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use anx_api::{build_router, config::Config, state::AppState};
use anx_graph::Engine;
use anx_loader::{LineSource, SheetSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Anxiety Free API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize the line source
    let source: Arc<dyn LineSource> = Arc::new(
        SheetSource::builder()
            .base_url(&config.sheet.base_url)
            .spreadsheet_id(&config.sheet.spreadsheet_id)
            .lines_sheet(&config.sheet.lines_sheet)
            .flows_sheet(&config.sheet.flows_sheet)
            .timeout(Duration::from_secs(config.sheet.timeout_secs))
            .build()?,
    );

    let state = Arc::new(AppState::new(config.clone(), Engine::new(), source));

    if config.engine.load_on_startup {
        tracing::info!("Loading bot lines and flows");
        match state.reload().await {
            Ok(graph) => tracing::info!(lines = graph.len(), "Bot lines and flows loaded"),
            Err(e) => tracing::warn!("Failed to load bot lines and flows, serving none: {}", e),
        }
    }

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API spec: http://{}/apispec.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
