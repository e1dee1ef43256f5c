//! Nikola API Server
//!
//! Loads the resource schema, ensures one table per resource and serves
//! the generic list/create endpoints.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nikola_api::{
    config::{AppConfig, DatabaseConfig, LogFormat},
    db::{create_pool, queries::resource::init_tables},
    routes::build_router,
    schema::load_schema,
    services::ResourceService,
    state::AppState,
    ResultExt,
};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat, default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let app_config = AppConfig::from_env();
    let logging = app_config.as_ref().cloned().unwrap_or_default();
    init_tracing(logging.log_format, logging.default_log_filter());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Nikola API"
    );

    let app_config = app_config.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load app config, using defaults");
        AppConfig::default()
    });

    let db_config = DatabaseConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load database config, using defaults");
        DatabaseConfig::default()
    });

    if app_config.uses_default_api_key() {
        tracing::warn!("NIKOLA_API_KEY not set, using default (not secure for production)");
    }

    tracing::info!(
        host = %app_config.host,
        port = app_config.port,
        schema = %app_config.schema_path,
        database = %db_config.path,
        debug = app_config.debug,
        "Configuration loaded"
    );

    let schema = load_schema(&app_config.schema_path).log("loading resource schema")?;

    let db_pool = create_pool(&db_config).await.log("opening database")?;
    init_tables(&db_pool, &schema)
        .await
        .log("initializing tables")?;

    let state = AppState::new(db_pool.clone(), app_config, schema);
    let resource_service = ResourceService::new(db_pool, state.schema.clone());

    let addr: SocketAddr = state.config.bind_address().parse()?;
    let app = build_router(state, resource_service);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
