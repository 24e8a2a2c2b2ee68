//! Meeting API Server
//!
//! Backend for the meeting assistant. Routes natural-language input through
//! an LLM and keeps a JSON contract database up to date. Provides REST API
//! endpoints for:
//!
//! - Legal/compliance chatbot
//! - Key legal item and action item extraction from transcripts
//! - Suggesting contract edits from a transcript and applying approved ones
//! - Reading and querying the contract database
//!
//! ## Known limitations
//!
//! The database is a single JSON file rewritten in full on every apply.
//! Applies are serialized inside this process, but nothing protects the file
//! from other writers, and a crash mid-write can corrupt it.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use axum::{
    routing::{get, post},
    Router,
};
use change_engine::JsonFileStore;
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod llm;
mod prompts;
mod state;

use llm::{GeminiClient, GeminiConfig};
pub use state::AppState;

/// Command-line arguments for the meeting API server
#[derive(Parser, Debug)]
#[command(name = "meeting-api")]
#[command(about = "Meeting assistant backend: transcript analysis and contract edits")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path of the JSON document database
    #[arg(long, env = "DB_PATH", default_value = "db.json")]
    db_path: PathBuf,

    /// Gemini API key (LLM endpoints fail without it)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = llm::DEFAULT_MODEL)]
    model: String,

    /// LLM request timeout in seconds
    #[arg(long, default_value = "30")]
    llm_timeout_secs: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// All routes, without transport-level middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::handle_root))
        .route("/health", get(api::handle_health))
        // Chatbot
        .route("/api/chatbot", post(api::handle_chatbot))
        // Transcript analysis
        .route("/api/extract", post(api::handle_extract))
        .route("/api/actions", post(api::handle_actions))
        // Contract edits
        .route("/api/suggest-changes", post(api::handle_suggest_changes))
        .route("/api/apply-changes", post(api::handle_apply_changes))
        // Database
        .route("/api/get-db", get(api::handle_get_database))
        .route("/api/query-docs", post(api::handle_query_documents))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting meeting API on {}:{}", args.host, args.port);

    let llm = GeminiClient::new(GeminiConfig {
        api_key: args.gemini_api_key.clone(),
        model: args.model.clone(),
        timeout: Duration::from_secs(args.llm_timeout_secs),
        ..GeminiConfig::default()
    })
    .context("Failed to build LLM client")?;
    let store = JsonFileStore::new(&args.db_path);

    if !store.path().exists() {
        tracing::warn!(
            "Document database {} does not exist yet; database endpoints will return 404",
            store.path().display()
        );
    }

    let state = AppState::new(Arc::new(llm), Arc::new(store));

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Apply middleware
    let app = build_router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Document database: {}", args.db_path.display());
    info!("LLM model: {}", args.model);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
