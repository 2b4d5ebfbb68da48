//! Layered configuration using figment.
//!
//! Sources, highest priority first:
//! 1. Command-line flags (applied by the caller after loading)
//! 2. Environment variables (`MUHURTA_*`, `__` separates sections)
//! 3. `muhurta.toml` in the working directory, or `--config PATH`
//! 4. Built-in defaults
//!
//! `MUHURTA_CACHE__TITHI_TTL_SECS=30` sets `cache.tithi_ttl_secs`.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use muhurta_feed::{FeedSource, default_sources};
use muhurta_vedic::{IndexProfile, MarketSession, NamedLocation, default_index_profiles};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "muhurta.toml";
pub const ENV_PREFIX: &str = "MUHURTA_";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// SPK kernels, searched in order.
    pub spk_paths: Vec<PathBuf>,
    /// Leapseconds kernel; built-in table when absent.
    #[serde(default)]
    pub lsk_path: Option<PathBuf>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            spk_paths: vec![PathBuf::from("de421.bsp")],
            lsk_path: None,
        }
    }
}

/// Birth details. Accepted and echoed, not used in any computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirthSettings {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// "HH:MM" local time.
    #[serde(default)]
    pub time: Option<String>,
}

/// Session bounds as "HH:MM" IST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSettings {
    pub open: String,
    pub close: String,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            open: "09:15".to_string(),
            close: "15:30".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    pub schedule_ttl_secs: u64,
    pub tithi_ttl_secs: u64,
    pub headlines_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            schedule_ttl_secs: 3600,
            tithi_ttl_secs: 60,
            headlines_ttl_secs: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSettings {
    pub enabled: bool,
    pub per_source: usize,
    pub timeout_secs: u64,
    pub sources: Vec<FeedSource>,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            per_source: muhurta_feed::DEFAULT_PER_SOURCE,
            timeout_secs: muhurta_feed::DEFAULT_TIMEOUT.as_secs(),
            sources: default_sources(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ephemeris: EphemerisSettings,
    #[serde(default)]
    pub location: NamedLocation,
    #[serde(default)]
    pub birth: BirthSettings,
    #[serde(default)]
    pub market: MarketSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default = "default_index_profiles")]
    pub indices: Vec<IndexProfile>,
    /// Seconds between `--watch` refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_refresh_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ephemeris: EphemerisSettings::default(),
            location: NamedLocation::default(),
            birth: BirthSettings::default(),
            market: MarketSettings::default(),
            cache: CacheSettings::default(),
            news: NewsSettings::default(),
            indices: default_index_profiles(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl AppConfig {
    /// Build the provider chain; `path` replaces `muhurta.toml`.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(p) = path.filter(|p| !p.exists()) {
            return Err(invalid("config", format!("{} does not exist", p.display())));
        }
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ephemeris.spk_paths.is_empty() {
            return Err(invalid("ephemeris.spk_paths", "at least one kernel is required"));
        }
        self.market_session()?;
        for (field, ttl) in [
            ("cache.schedule_ttl_secs", self.cache.schedule_ttl_secs),
            ("cache.tithi_ttl_secs", self.cache.tithi_ttl_secs),
            ("cache.headlines_ttl_secs", self.cache.headlines_ttl_secs),
        ] {
            if ttl == 0 {
                return Err(invalid(field, "must be positive"));
            }
        }
        if self.news.timeout_secs == 0 {
            return Err(invalid("news.timeout_secs", "must be positive"));
        }
        if self.refresh_secs == 0 {
            return Err(invalid("refresh_secs", "must be positive"));
        }
        if self.indices.is_empty() {
            return Err(invalid("indices", "at least one index profile is required"));
        }
        if let Some(p) = self.indices.iter().find(|p| p.name.trim().is_empty()) {
            return Err(invalid("indices", format!("profile with empty name ({p:?})")));
        }
        if let Some(time) = &self.birth.time {
            parse_hhmm("birth.time", time)?;
        }
        Ok(())
    }

    pub fn market_session(&self) -> Result<MarketSession, ConfigError> {
        let open = parse_hhmm("market.open", &self.market.open)?;
        let close = parse_hhmm("market.close", &self.market.close)?;
        MarketSession::new(open, close).map_err(|e| invalid("market", e.to_string()))
    }
}

fn parse_hhmm(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| invalid(field, format!("{value:?}: {e}")))
}
