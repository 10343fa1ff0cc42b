//! Application configuration.
//!
//! Cache sizing and the rule cutover month, loadable from YAML files or
//! environment variables. Every field has a default, so an empty source
//! yields a working configuration.

use serde::Deserialize;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
use crate::rules::DEFAULT_CUTOVER;
use crate::schedule::{MonthKeyError, YearMonth};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "shift-overlap.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "SHIFT_OVERLAP_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "SHIFT_OVERLAP";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "SHIFT_OVERLAP_LOG";

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid cutover month '{value}': {source}")]
    InvalidCutover {
        value: String,
        #[source]
        source: MonthKeyError,
    },

    #[error("cache.max_entries must be at least 1")]
    ZeroCapacity,
}

/// Main configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Overlap cache configuration.
    pub cache: CacheConfig,
    /// Rule version configuration.
    pub rules: RulesConfig,
}

/// Overlap cache sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in seconds.
    ///
    /// Default: 300 (5 minutes).
    pub ttl_secs: u64,

    /// Entry count above which expired entries are swept on insert.
    ///
    /// Default: 50.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL.as_secs(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_secs)
    }
}

/// Rule version selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// First month (`YYYY-MM`) computed with the current rule set.
    pub cutover: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            cutover: DEFAULT_CUTOVER.to_string(),
        }
    }
}

impl RulesConfig {
    pub fn cutover_month(&self) -> Result<YearMonth, ConfigError> {
        YearMonth::parse_key(&self.cutover).map_err(|source| ConfigError::InvalidCutover {
            value: self.cutover.clone(),
            source,
        })
    }
}

impl AnalyticsConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `shift-overlap.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, nested keys
    ///    separated by `__` (e.g. `SHIFT_OVERLAP_CACHE__TTL_SECS=60`)
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AnalyticsConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot: the cutover month and a non-zero cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.cutover_month()?;
        if self.cache.max_entries == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
