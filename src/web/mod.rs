//! Web UI
//!
//! Axum router with one tab per feature. Pages are rendered on the server;
//! each browser gets its own in-memory session via a cookie.

pub mod handlers;
pub mod render;
pub mod session;

use crate::assistant::AssistantService;
use crate::config::ServerConfig;
use crate::import::MAX_UPLOAD_BYTES;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::middleware;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

const STYLESHEET: &str = include_str!("assets/style.css");

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub assistant: AssistantService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(assistant: AssistantService, sessions: SessionStore) -> Self {
        Self {
            assistant,
            sessions,
        }
    }
}

pub fn router(state: AppState) -> Router {
    use handlers::{finance, ideas, notes, tasks, todos};

    let pages = Router::new()
        .route("/tasks", get(tasks::show).post(tasks::split))
        .route("/todos", get(todos::show).post(todos::add))
        .route("/todos/{index}/toggle", post(todos::toggle))
        .route("/todos/clear", post(todos::clear))
        .route("/todos/export", get(todos::export))
        .route("/ideas", get(ideas::show).post(ideas::generate))
        .route("/notes", get(notes::show).post(notes::clean))
        .route("/notes/export", get(notes::export))
        .route("/finance", get(finance::show).post(finance::add))
        .route("/finance/tip", post(finance::tip))
        .route("/finance/export", get(finance::export))
        .layer(middleware::from_fn_with_state(state.clone(), session::attach));

    Router::new()
        .route("/", get(|| async { Redirect::to("/tasks") }))
        .route("/health", get(|| async { "ok" }))
        .route("/assets/style.css", get(stylesheet))
        .merge(pages)
        // Multipart framing adds a little on top of the file itself
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, server: &ServerConfig) -> Result<()> {
    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    let local = listener
        .local_addr()
        .context("Failed to read listener address")?;
    tracing::info!("Command Center listening on http://{}", local);

    let sessions = state.sessions.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!(
        "Server stopped ({} session(s) discarded)",
        sessions.live_count().await
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
