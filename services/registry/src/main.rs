use sea_orm::{ConnectOptions, Database};
use tracing::info;

use tss_core::tracing::init_tracing;
use tss_registry::config::RegistryConfig;
use tss_registry::router::build_router;
use tss_registry::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RegistryConfig::from_env();

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(config.store_timeout)
        .acquire_timeout(config.store_timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db: db.clone(),
        store_timeout: config.store_timeout,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.registry_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("registry service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "database pool did not close cleanly");
    }
    info!("registry service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
