use meuchapa_support_hub::{
    analytics::AnalyticsEngine,
    api::{build_router, AppState},
    config::Config,
    state::{load_snapshot, InMemoryTicketStore, TicketSource},
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    init_tracing(&config);

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Initialize Prometheus metrics
    if config.observability.prometheus_enabled {
        if let Err(e) = meuchapa_support_hub::metrics::init_metrics() {
            tracing::warn!("Failed to initialize metrics: {}", e);
            tracing::warn!("Continuing without metrics");
        } else {
            tracing::info!("Prometheus metrics initialized");
        }
    } else {
        tracing::info!("Prometheus metrics disabled in configuration");
    }

    // Initialize ticket store
    let store = Arc::new(InMemoryTicketStore::new());
    if let Some(path) = &config.store.snapshot_path {
        let tickets = load_snapshot(path).await?;
        let loaded = store.replace_all(tickets).await?;
        tracing::info!(path = %path.display(), loaded, "Ticket snapshot loaded");
    } else {
        tracing::warn!("No store.snapshot_path configured, starting with an empty ticket store");
    }

    // Initialize analytics engine
    let engine = Arc::new(AnalyticsEngine::new(store, config.analytics_config()));
    tracing::info!(
        cache_ttl_secs = config.analytics.report_cache_ttl_secs,
        "Analytics engine initialized"
    );

    let state = AppState::new(engine)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs));
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "meuchapa_support_hub={},tower_http={}",
            config.observability.log_level, config.observability.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
