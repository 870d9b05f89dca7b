//! HTTP server for the compliance chatbot

pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::chat::ChatService;
use crate::config::RagConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Compliance chatbot HTTP server
pub struct RagServer {
    config: RagConfig,
    state: AppState,
}

impl RagServer {
    /// Create a server around a ready chat service
    pub fn new(config: RagConfig, chat: ChatService) -> Self {
        let state = AppState::new(config.clone(), chat);
        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address; the host may be a name or an IP
    pub async fn bind(&self) -> Result<TcpListener> {
        let address = self.address();
        TcpListener::bind(&address)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind {}: {}", address, e)))
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let listener = self.bind().await?;
        let router = self.build_router();

        tracing::info!("Starting compliance chatbot on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Build the application router over a state
pub fn build_router(state: AppState) -> Router {
    let enable_cors = state.config().server.enable_cors;

    let router = Router::new()
        .route("/health", get(health_check))
        .merge(routes::chat_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
