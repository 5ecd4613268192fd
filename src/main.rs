//! Briefly - document summarization service
//!
//! Main entry point.

use briefly::{
    service::AppService,
    state::{AppConfig, AppState},
    store::SummaryStore,
    summarizer::SummarizerClient,
    web_api,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "briefly=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Briefly v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (fails fast without a provider API key)
    let config = AppConfig::from_env()?;
    tracing::info!(
        database_url = %config.database_url,
        summarizer_api_url = %config.summarizer_api_url,
        summarizer_model = %config.summarizer_model,
        static_dir = %config.static_dir,
        "Configuration loaded"
    );

    // Create database pool; the SQLite file is created on first use
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options)
        .await?;

    tracing::info!("Database connected");

    // Initialize components
    let store = SummaryStore::new(pool.clone());
    store.init_schema().await?;
    tracing::info!("SummaryStore initialized");

    let summarizer = Arc::new(SummarizerClient::with_timeout(
        config.summarizer_api_url.clone(),
        config.summarizer_model.clone(),
        config.summarizer_api_key.clone(),
        config.summarizer_timeout,
    ));
    tracing::info!("SummarizerClient initialized");

    let service = Arc::new(AppService::new(summarizer, store));

    let state = AppState {
        pool,
        config: config.clone(),
        service,
    };

    // Create router with static file serving
    let serve_dir = ServeDir::new(&config.static_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", config.static_dir)));

    let app = web_api::create_router(state)
        .fallback_service(serve_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    tracing::info!(static_dir = %config.static_dir, "Static file serving enabled");

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
