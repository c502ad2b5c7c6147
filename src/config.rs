use crate::analytics::{AnalyticsConfig, SlaTargetTable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an optional override file
pub const CONFIG_PATH_ENV: &str = "MEUCHAPA_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Report generation settings
    #[serde(default)]
    pub analytics: AnalyticsSettings,

    /// Ticket store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// SLA targets in minutes
    #[serde(default)]
    pub sla: SlaTargetTable,
}

impl Config {
    /// Load configuration from the embedded defaults, the file named by
    /// `MEUCHAPA_CONFIG` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_from(config_path)
    }

    /// Load configuration with an explicit override file
    pub fn load_from(path: Option<PathBuf>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ));

        // Override with config file if it exists
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config: Config = builder
            // Override with environment variables (prefix: MEUCHAPA)
            .add_source(
                config::Environment::with_prefix("MEUCHAPA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.sla.validate().map_err(config::ConfigError::Message)?;

        if self.server.port == 0 {
            return Err(config::ConfigError::Message(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.analytics.report_cache_ttl_secs > 0 && self.analytics.report_cache_capacity == 0 {
            return Err(config::ConfigError::Message(
                "analytics.report_cache_capacity must be positive when caching is enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Engine configuration derived from the `analytics` and `sla` sections
    pub fn analytics_config(&self) -> AnalyticsConfig {
        AnalyticsConfig {
            sla_targets: self.sla,
            report_cache_ttl_secs: self.analytics.report_cache_ttl_secs,
            report_cache_capacity: self.analytics.report_cache_capacity,
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            prometheus_enabled: true,
            service_name: default_service_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Report cache TTL (seconds), 0 disables the cache
    #[serde(default = "default_report_cache_ttl")]
    pub report_cache_ttl_secs: u64,

    /// Maximum number of cached reports
    #[serde(default = "default_report_cache_capacity")]
    pub report_cache_capacity: u64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            report_cache_ttl_secs: default_report_cache_ttl(),
            report_cache_capacity: default_report_cache_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot loaded at startup
    pub snapshot_path: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "meuchapa-support-hub".to_string()
}

fn default_true() -> bool {
    true
}

fn default_report_cache_ttl() -> u64 {
    60
}

fn default_report_cache_capacity() -> u64 {
    1_000
}
