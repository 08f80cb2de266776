//! Explorer configuration types
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables of the form `NEXUS__SECTION__KEY`.

use anyhow::Context;
use nexus_emission::{
    EmissionParams, DEFAULT_MAX_HALVING_EVENTS, DEFAULT_SAMPLES_PER_YEAR, DEFAULT_YEARS_TO_PROJECT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "nexus.toml";

/// Environment override prefix
pub const ENV_PREFIX: &str = "NEXUS";

/// Complete explorer configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Emission curve constants
    #[serde(default)]
    pub emission: EmissionParams,

    /// Query shapes for the emission endpoint
    #[serde(default)]
    pub query: QueryConfig,

    /// Network metrics the emission model does not derive
    #[serde(default)]
    pub network: NetworkMetricsConfig,

    /// Response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl ExplorerConfig {
    /// Load from `path` (must exist) or from `nexus.toml` if present
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let resolved: Option<PathBuf> = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file {} not found", path.display());
                }
                Some(path.to_path_buf())
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                default.exists().then_some(default)
            }
        };

        let mut builder = config::Config::builder();
        if let Some(path) = &resolved {
            builder = builder.add_source(
                config::File::from(path.as_path()).format(config::FileFormat::Toml),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = builder
            .build()?
            .try_deserialize()
            .context("Failed to parse explorer configuration")?;
        loaded.validate()?;

        match &resolved {
            Some(path) => tracing::debug!("Loaded configuration from {}", path.display()),
            None => tracing::debug!("No configuration file, using defaults"),
        }

        Ok(loaded)
    }

    /// Parse a TOML document without environment overrides
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let parsed: Self = toml::from_str(content)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.emission.validate()?;
        if self.query.samples_per_year == 0 {
            anyhow::bail!("query.samples_per_year must be positive");
        }
        if self.cache.ttl_secs == 0 {
            anyhow::bail!("cache.ttl_secs must be positive");
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Allow any origin (the dashboard is served from a different host)
    #[serde(default = "default_true")]
    pub cors_allow_any: bool,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_allow_any: true,
        }
    }
}

/// Emission endpoint query shape
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_years_to_project")]
    pub years_to_project: u32,

    #[serde(default = "default_samples_per_year")]
    pub samples_per_year: u32,

    #[serde(default = "default_max_halving_events")]
    pub max_halving_events: u32,
}

fn default_years_to_project() -> u32 {
    DEFAULT_YEARS_TO_PROJECT
}

fn default_samples_per_year() -> u32 {
    DEFAULT_SAMPLES_PER_YEAR
}

fn default_max_halving_events() -> u32 {
    DEFAULT_MAX_HALVING_EVENTS
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            years_to_project: default_years_to_project(),
            samples_per_year: default_samples_per_year(),
            max_halving_events: default_max_halving_events(),
        }
    }
}

/// Externally sourced network figures, reported alongside the snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkMetricsConfig {
    /// Hashrate in TH/s
    #[serde(default = "default_hashrate_ths")]
    pub hashrate_ths: f64,

    #[serde(default = "default_difficulty")]
    pub difficulty: f64,

    /// Average block time in seconds
    #[serde(default = "default_block_time_secs")]
    pub block_time_secs: f64,

    /// Provenance label reported for hashrate and difficulty
    #[serde(default = "default_metrics_source")]
    pub source: String,
}

fn default_hashrate_ths() -> f64 {
    145_000.0
}

fn default_difficulty() -> f64 {
    5_200_000_000_000.0
}

fn default_block_time_secs() -> f64 {
    1.0
}

fn default_metrics_source() -> String {
    "placeholder".to_string()
}

impl Default for NetworkMetricsConfig {
    fn default() -> Self {
        Self {
            hashrate_ths: default_hashrate_ths(),
            difficulty: default_difficulty(),
            block_time_secs: default_block_time_secs(),
            source: default_metrics_source(),
        }
    }
}

/// Response cache configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Width of a cache time bucket in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Log output format
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Metrics configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Expose `/metrics`
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
