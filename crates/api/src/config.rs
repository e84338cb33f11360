//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` bind address (default: `"0.0.0.0"`)
/// - `PORT` listen port (default: `3000`)
/// - `RUST_LOG` tracing filter directive (default: `"info"`)
/// - `APP_ENV` deployment environment (default: `"development"`)
/// - `SERVICE_NAME` log file prefix (default: `"ecommerce-api"`)
/// - `LOG_DIR` directory for log files (default: `"logs"`)
/// - `DB_ENGINE` storage engine key (default: `"memory"`)
/// - `DATABASE_URL` PostgreSQL connection string (optional)
/// - `LOW_STOCK_THRESHOLD` default for the low-stock query (default: `5`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub environment: String,
    pub service_name: String,
    pub log_dir: PathBuf,
    pub db_engine: String,
    pub database_url: Option<String>,
    pub low_stock_threshold: u32,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: non_empty("RUST_LOG").unwrap_or(defaults.log_level),
            environment: non_empty("APP_ENV").unwrap_or(defaults.environment),
            service_name: non_empty("SERVICE_NAME").unwrap_or(defaults.service_name),
            log_dir: non_empty("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            db_engine: non_empty("DB_ENGINE").unwrap_or(defaults.db_engine),
            database_url: non_empty("DATABASE_URL"),
            low_stock_threshold: non_empty("LOW_STOCK_THRESHOLD")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.low_stock_threshold),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            environment: "development".to_string(),
            service_name: "ecommerce-api".to_string(),
            log_dir: PathBuf::from("logs"),
            db_engine: "memory".to_string(),
            database_url: None,
            low_stock_threshold: 5,
        }
    }
}
