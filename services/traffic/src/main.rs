use tracing::info;

use tss_core::tracing::init_tracing;
use tss_traffic::config::TrafficConfig;
use tss_traffic::router::build_router;
use tss_traffic::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = TrafficConfig::from_env();

    let state = AppState {
        simulated_latency: config.simulated_latency,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.traffic_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("traffic service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
    info!("traffic service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
