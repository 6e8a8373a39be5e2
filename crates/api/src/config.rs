use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Days a hidden review survives before the retention sweep purges it
    /// (default: `2`).
    pub review_retention_days: i64,
    /// How often the review retention sweep runs, in seconds (default:
    /// `3600`).
    pub review_sweep_interval_secs: u64,
    /// Days an abandoned cart survives before the expiry sweep removes it
    /// (default: `7`).
    pub cart_ttl_days: i64,
    /// How often the cart expiry sweep runs, in seconds (default: `3600`).
    pub cart_sweep_interval_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `REVIEW_RETENTION_DAYS`     | `2`                     |
    /// | `REVIEW_SWEEP_INTERVAL_SECS`| `3600`                  |
    /// | `CART_TTL_DAYS`             | `7`                     |
    /// | `CART_SWEEP_INTERVAL_SECS`  | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let review_retention_days: i64 = std::env::var("REVIEW_RETENTION_DAYS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("REVIEW_RETENTION_DAYS must be a valid i64");

        let review_sweep_interval_secs: u64 = std::env::var("REVIEW_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("REVIEW_SWEEP_INTERVAL_SECS must be a valid u64");

        let cart_ttl_days: i64 = std::env::var("CART_TTL_DAYS")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .expect("CART_TTL_DAYS must be a valid i64");

        let cart_sweep_interval_secs: u64 = std::env::var("CART_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("CART_SWEEP_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            review_retention_days,
            review_sweep_interval_secs,
            cart_ttl_days,
            cart_sweep_interval_secs,
            jwt,
        }
    }
}
