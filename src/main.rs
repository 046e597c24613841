//! Homepage chat - a keyword-matching assistant for a personal homepage
//!
//! Serves the page and hosts one scripted chat session per visitor.

mod api;
mod config;
mod matcher;
mod runtime;
mod state_machine;
mod transcript;

use api::{create_router, AppState};
use config::ChatConfig;
use runtime::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homepage_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env();
    let script = Arc::new(config.load_script()?);
    tracing::info!(
        rules = script.rules.len(),
        timing = ?config.timing,
        idle_timeout_secs = config.idle_timeout.as_secs(),
        bot_name = %config.bot_name,
        "Chat script ready"
    );

    let sessions = Arc::new(SessionManager::new(script, config.timing));
    let _reaper = SessionManager::spawn_reaper(&sessions, config.idle_timeout);
    let state = AppState::new(sessions, &config.bot_name);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Homepage chat listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
