// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::news::categories::DEFAULT_CATEGORY;
use crate::news::DEFAULT_DISPLAY_LIMIT;
use crate::weather::regions::DEFAULT_REGION;
use crate::weather::DEFAULT_FORECAST_BASE_URL;

pub const ENV_CONFIG_PATH: &str = "PANEL_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/panel.toml";
pub const MAX_DISPLAY_LIMIT: usize = 50;
/// Upper bound for a single request, weather fetch or feed strategy attempt.
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 10;

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_weather_refresh_secs() -> u64 {
    600
}
fn default_news_refresh_secs() -> u64 {
    300
}
fn default_calendar_tick_secs() -> u64 {
    60
}
fn default_news_display_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_weather_base_url() -> String {
    DEFAULT_FORECAST_BASE_URL.to_string()
}
fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}
fn default_user_agent() -> String {
    concat!("info-display/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_weather_refresh_secs")]
    pub weather_refresh_secs: u64,
    #[serde(default = "default_news_refresh_secs")]
    pub news_refresh_secs: u64,
    #[serde(default = "default_calendar_tick_secs")]
    pub calendar_tick_secs: u64,
    #[serde(default = "default_news_display_limit")]
    pub news_display_limit: usize,
    /// Per-request bound for every weather fetch and feed strategy attempt.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    #[serde(default = "default_region")]
    pub default_region: String,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            weather_refresh_secs: default_weather_refresh_secs(),
            news_refresh_secs: default_news_refresh_secs(),
            calendar_tick_secs: default_calendar_tick_secs(),
            news_display_limit: default_news_display_limit(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            weather_base_url: default_weather_base_url(),
            default_region: default_region(),
            default_category: default_category(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(s).context("parsing panel config toml")?;
        Ok(cfg.sanitized())
    }

    /// Load from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading panel config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks:
    /// 1) $PANEL_CONFIG_PATH (must exist)
    /// 2) config/panel.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }

    /// Replace zero intervals with defaults, clamp the display limit and cap the
    /// per-request timeout.
    pub fn sanitized(mut self) -> Self {
        if self.weather_refresh_secs == 0 {
            self.weather_refresh_secs = default_weather_refresh_secs();
        }
        if self.news_refresh_secs == 0 {
            self.news_refresh_secs = default_news_refresh_secs();
        }
        if self.calendar_tick_secs == 0 {
            self.calendar_tick_secs = default_calendar_tick_secs();
        }
        if self.fetch_timeout_secs == 0 {
            self.fetch_timeout_secs = default_fetch_timeout_secs();
        }
        self.fetch_timeout_secs = self.fetch_timeout_secs.min(MAX_FETCH_TIMEOUT_SECS);
        self.news_display_limit = self.news_display_limit.clamp(1, MAX_DISPLAY_LIMIT);
        if self.default_region.trim().is_empty() {
            self.default_region = default_region();
        }
        if self.default_category.trim().is_empty() {
            self.default_category = default_category();
        }
        self
    }

    pub fn weather_refresh(&self) -> Duration {
        Duration::from_secs(self.weather_refresh_secs)
    }

    pub fn news_refresh(&self) -> Duration {
        Duration::from_secs(self.news_refresh_secs)
    }

    pub fn calendar_tick(&self) -> Duration {
        Duration::from_secs(self.calendar_tick_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
