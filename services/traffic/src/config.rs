use std::time::Duration;

/// Traffic service configuration loaded from environment variables.
#[derive(Debug)]
pub struct TrafficConfig {
    /// TCP port to listen on (default 3121). Env var: `TRAFFIC_PORT`.
    pub traffic_port: u16,
    /// Artificial processing delay of the simulated detectors (default 0 ms).
    /// Env var: `SIMULATED_LATENCY_MS`.
    pub simulated_latency: Duration,
}

impl TrafficConfig {
    pub fn from_env() -> Self {
        Self {
            traffic_port: std::env::var("TRAFFIC_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3121),
            simulated_latency: Duration::from_millis(
                std::env::var("SIMULATED_LATENCY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
            ),
        }
    }
}
