//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all gateway handlers
//! - Wire up middleware (tracing, limits, request ID, timeout)
//! - Serve on the bound listener with graceful shutdown
//!
//! # Design Decisions
//! - In-flight requests get the configured drain window after a stop
//!   signal, then the server future is abandoned

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::BridgeConfig;
use crate::http::handlers;
use crate::http::request::RequestUuid;
use crate::lifecycle::Shutdown;
use crate::observability::DiagState;
use crate::upstream::ChatClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ChatClient>,
    pub diag: Arc<DiagState>,
    pub config: Arc<BridgeConfig>,
}

/// HTTP server for the skill gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BridgeConfig) -> Result<Self, reqwest::Error> {
        let client = Arc::new(ChatClient::new(config.upstream.clone())?);
        let state = AppState {
            client,
            diag: Arc::new(DiagState::new()),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::healthz))
            .route("/healthz", get(handlers::healthz))
            .route("/diag", get(handlers::diag))
            .route("/webhook", post(handlers::webhook))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once the listener task finishes or the shutdown drain window
    /// expires after a stop signal.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut graceful_rx = shutdown.subscribe();
        let mut drain_rx = shutdown.subscribe();
        let drain = shutdown.drain_window();

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = graceful_rx.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .into_future();
        tokio::pin!(serve);

        tokio::select! {
            result = &mut serve => result?,
            _ = drain_rx.recv() => {
                match tokio::time::timeout(drain, &mut serve).await {
                    Ok(result) => result?,
                    Err(_) => {
                        tracing::warn!(window = ?drain, "Drain window expired, abandoning in-flight requests");
                    }
                }
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
