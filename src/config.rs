//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// SQLite connection URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    // === Behaviour ===
    /// Reject songs whose `bandId` matches no band.
    #[serde(default)]
    pub strict_band_refs: bool,

    // === Server Configuration ===
    /// HTTP server port for the API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Port for the Prometheus exporter; disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_database_url() -> String {
    "sqlite://bandas.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_port() -> u16 {
    3003
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            db_max_connections: default_max_connections(),
            strict_band_refs: false,
            port: default_port(),
            metrics_port: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err("DATABASE_URL is required".to_string());
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: URL".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        if self.metrics_port == Some(self.port) {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }
}
