mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod review;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::review::extractor::FileExtractor;
use crate::review::feedback::LlmFeedbackGenerator;
use crate::review::renderer::CommandPdfRenderer;
use crate::review::service::ResumeService;
use crate::review::store::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    info!(
        "PDF renderer: {} {:?}, output dir {}",
        config.pdf_renderer_bin,
        config.pdf_renderer_args,
        config.output_dir.display()
    );

    let resumes = ResumeService::new(
        Arc::new(PgResumeStore::new(db)),
        Arc::new(FileExtractor),
        Arc::new(LlmFeedbackGenerator::new(llm)),
        Arc::new(CommandPdfRenderer::new(
            config.pdf_renderer_bin.clone(),
            config.pdf_renderer_args.clone(),
        )),
        config.output_dir.clone(),
    );

    // Build app state
    let state = AppState {
        resumes: Arc::new(resumes),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
