use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// Secrets (`DATABASE_URL`, `JWT_SECRET`) are required and never defaulted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_access_token_expiry_secs: i64,
    pub dashboard_query_timeout_ms: u64,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("BACKEND_PORT", 3000),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_access_token_expiry_secs: parse_or("JWT_ACCESS_TOKEN_EXPIRY_SECS", 3600),
            dashboard_query_timeout_ms: parse_or("DASHBOARD_QUERY_TIMEOUT_MS", 2000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        })
    }

    /// Upper bound for a single dashboard query, connection acquisition included.
    pub fn dashboard_query_timeout(&self) -> Duration {
        Duration::from_millis(self.dashboard_query_timeout_ms.max(1))
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
