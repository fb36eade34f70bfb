//! # Ledger Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging (and OTLP trace export when configured)
//! - Initialize the repository adapter
//! - Create the ledger service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_hex::{LedgerService, inbound::HttpServer};
use ledger_repo::build_repo;

use config::{Config, LogFormat};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("ledger-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize OpenTelemetry tracing when a collector is configured
    let otel = config.otlp_endpoint.as_deref().map(init_tracer).transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    let (json, pretty) = match config.log_format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(tracing_subscriber::fmt::layer())),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ledger_app=debug,ledger_hex=debug".into()),
        )
        .with(json)
        .with(pretty)
        .with(telemetry)
        .init();

    let addr = config.bind_addr();
    tracing::info!("Starting ledger server on {}", addr);
    tracing::info!("Using database: {}", config.redacted_database_url());
    if !config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS allowed origins: {:?}", config.cors_allowed_origins);
    }

    // Build repository (handles connection and schema)
    let repo = build_repo(&config.database_url).await?;

    // Create the ledger service
    let service = LedgerService::new(repo);

    // Create and run the HTTP server
    let server = HttpServer::new(service).with_allowed_origins(config.cors_allowed_origins);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
