use std::time::Duration;

/// Registry service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RegistryConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3120). Env var: `REGISTRY_PORT`.
    pub registry_port: u16,
    /// Upper bound for a single store round-trip (default 5000 ms). Env var: `STORE_TIMEOUT_MS`.
    pub store_timeout: Duration,
    /// Maximum pooled connections (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub max_connections: u32,
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            registry_port: env_or("REGISTRY_PORT", 3120),
            store_timeout: Duration::from_millis(env_or("STORE_TIMEOUT_MS", 5000)),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
