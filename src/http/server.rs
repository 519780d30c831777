//! Preview HTTP server.
//!
//! # Responsibilities
//! - Create Axum Router with the render and health handlers
//! - Wire up middleware (tracing, timeout, body limit)
//! - Negotiate from `Accept` and render envelopes through the layer
//! - Bind server to listener and shut down on Ctrl+C

use std::time::Duration;

use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HostConfig;
use crate::format::{Charset, RequestContext};
use crate::http::envelope::RenderEnvelope;
use crate::response::render;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub default_charset: Charset,
}

/// HTTP server rendering script results.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The config is expected to be validated; an unsupported charset falls
    /// back to UTF-8.
    pub fn new(config: HostConfig) -> Self {
        let state = AppState {
            default_charset: config.response.default_charset.parse().unwrap_or_default(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    #[allow(deprecated)]
    fn build_router(config: &HostConfig, state: AppState) -> Router {
        Router::new()
            .route("/render", post(render_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.limits.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

async fn render_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(envelope): Json<RenderEnvelope>,
) -> Response {
    let request = RequestContext::from_headers(&headers, state.default_charset);
    tracing::debug!(
        negotiated = ?request.negotiated_content_type.as_ref().map(|m| m.to_string()),
        status = ?envelope.status,
        "Rendering envelope"
    );
    render(&request, envelope.into_descriptor()).await
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
