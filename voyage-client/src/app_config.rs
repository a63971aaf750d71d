use serde::Deserialize;
use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub filters: FilterDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Initial duration slider range of the filter sidebar.
#[derive(Debug, Deserialize, Clone)]
pub struct FilterDefaults {
    pub duration_min: u32,
    pub duration_max: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VOYAGE__API__BASE_URL=http://api:8080/api`
            .add_source(config::Environment::with_prefix("VOYAGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in defaults overlaid with a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, config::ConfigError> {
        Self::defaults()?
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_seconds", 30i64)?
            .set_default("filters.duration_min", 60i64)?
            .set_default("filters.duration_max", 1320i64)
    }
}
