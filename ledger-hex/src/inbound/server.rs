//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use ledger_types::TransactionRepository;

use super::handlers::{self, AppState};
use crate::LedgerService;

/// HTTP Server for the Ledger API.
pub struct HttpServer<R: TransactionRepository> {
    state: Arc<AppState<R>>,
    allowed_origins: Vec<String>,
}

impl<R: TransactionRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service and no CORS headers.
    pub fn new(service: LedgerService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            allowed_origins: Vec::new(),
        }
    }

    /// Allows browser requests from the given origins. `"*"` allows any origin.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let router = Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route(
                "/transactions",
                get(handlers::list_transactions::<R>).post(handlers::create_transaction::<R>),
            )
            .route("/transactions/summary", get(handlers::summary::<R>))
            .route(
                "/transactions/{id}",
                get(handlers::get_transaction::<R>)
                    .put(handlers::update_transaction::<R>)
                    .patch(handlers::update_transaction::<R>)
                    .delete(handlers::delete_transaction::<R>),
            )
            .layer(metrics);

        // No origins configured means no CORS headers at all.
        let router = if self.allowed_origins.is_empty() {
            router
        } else {
            router.layer(cors_layer(&self.allowed_origins))
        };

        router
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Builds the CORS policy for the configured origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
