/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Absent ⇒ the ephemeral in-memory store is
    /// selected at startup. Env var: `DATABASE_URL`.
    pub database_url: Option<String>,
    /// Database connection probe timeout in seconds (default 5).
    /// Env var: `DB_CONNECT_TIMEOUT_SECS`.
    pub db_connect_timeout_secs: u64,
    /// TCP port to listen on (default 3100). Env var: `API_PORT`.
    pub api_port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            db_connect_timeout_secs: std::env::var("DB_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
        }
    }
}
