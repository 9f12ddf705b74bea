use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shc_core::{
    config::core_config_from_env_values,
    constants::{DEFAULT_REST_ADDR, REST_ADDR_ENV, SEED_SAMPLE_DATA_ENV, SUGGESTION_COUNT_ENV},
    seed::sample_registry,
    PatientService, Registry,
};

/// Main entry point for the Smart Health Care service
///
/// Starts the REST server over a single in-memory registry. Records live only as long as the
/// process does.
///
/// # Environment Variables
/// - `SHC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SHC_SUGGESTION_COUNT`: suggested treatments per search match (default: 3)
/// - `SHC_SEED_SAMPLE_DATA`: load the demo patients at startup (default: true)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shc_run=info".parse()?)
                .add_directive("shc_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(core_config_from_env_values(
        std::env::var(SUGGESTION_COUNT_ENV).ok(),
        std::env::var(SEED_SAMPLE_DATA_ENV).ok(),
    )?);
    let rest_addr = std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let registry = if cfg.seed_sample_data() {
        sample_registry()?
    } else {
        Registry::new()
    };
    tracing::info!(
        patients = registry.len(),
        suggestion_count = cfg.suggestion_count(),
        "++ Loaded patient registry"
    );

    let app = api_rest::router(PatientService::new(cfg, registry));

    tracing::info!("++ Starting Smart Health Care REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
