use anyhow::Context;
use guesswork::api::{self, app_state::AppState};
use guesswork::config::loader::{ConfigLoader, config_exists, default_config_path};
use guesswork::observability::{
    HealthCheckResult, ObservabilityState, create_observability_router, init_tracing,
};
use guesswork::services::create_guess_service;
use guesswork::storage::factory::StorageFactory;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging, env!("CARGO_PKG_NAME"));
    info!("Starting Guesswork...");
    if config_exists() {
        info!("Configuration loaded from {}", default_config_path().display());
    } else {
        info!("No {} found, using defaults and environment", default_config_path().display());
    }

    let store = StorageFactory::create(&config.storage);
    info!("State store initialized: {}", store.backend_name());

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
    ));

    let started = Instant::now();
    let storage_check = StorageFactory::health_check(store.as_ref()).await;
    if let Err(e) = &storage_check {
        warn!("Storage health check failed: {}", e);
    }
    observability_state
        .add_health_check(HealthCheckResult {
            name: "storage".to_string(),
            healthy: storage_check.is_ok(),
            message: match &storage_check {
                Ok(_) => format!("{} store readable", store.backend_name()),
                Err(e) => e.to_string(),
            },
            latency_ms: started.elapsed().as_millis() as u64,
        })
        .await;

    let guess_service = create_guess_service(config.engine.clone(), store)
        .await
        .context("failed to load engine state")?;
    info!("Guess engine initialized");

    let app_state = AppState::new(guess_service, observability_state.clone());
    info!("Application state created");

    let api_router = api::initialize_api(app_state, &config.server.cors_origins).await?;
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
