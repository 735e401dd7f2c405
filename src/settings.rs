// src/settings.rs
//! Settings collaborator: two free-form keys with defaults, read by the refresh loops.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    #[serde(rename = "weatherRegion")]
    WeatherRegion,
    #[serde(rename = "newsCategory")]
    NewsCategory,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::WeatherRegion => "weatherRegion",
            SettingKey::NewsCategory => "newsCategory",
        }
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weatherRegion" => Ok(SettingKey::WeatherRegion),
            "newsCategory" => Ok(SettingKey::NewsCategory),
            other => Err(SettingsError::UnknownKey(other.to_string())),
        }
    }
}

pub trait SettingsStore: Send + Sync {
    /// Configured value, or the default when unset.
    fn get(&self, key: SettingKey) -> String;
    fn set(&self, key: SettingKey, value: String);
}

/// Both settings at once, as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub weather_region: String,
    pub news_category: String,
}

impl SettingsSnapshot {
    pub fn read(store: &dyn SettingsStore) -> Self {
        Self {
            weather_region: store.get(SettingKey::WeatherRegion),
            news_category: store.get(SettingKey::NewsCategory),
        }
    }
}

/// Partial update; absent or blank fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsUpdate {
    pub weather_region: Option<String>,
    pub news_category: Option<String>,
}

impl SettingsUpdate {
    /// Apply to `store`, returning whether anything changed.
    pub fn apply(self, store: &dyn SettingsStore) -> bool {
        let mut changed = false;
        for (key, value) in [
            (SettingKey::WeatherRegion, self.weather_region),
            (SettingKey::NewsCategory, self.news_category),
        ] {
            let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
            else {
                continue;
            };
            if store.get(key) != value {
                store.set(key, value);
                changed = true;
            }
        }
        changed
    }
}

/// In-process store; nothing survives a restart.
#[derive(Debug)]
pub struct MemorySettings {
    defaults: HashMap<SettingKey, String>,
    values: RwLock<HashMap<SettingKey, String>>,
}

impl MemorySettings {
    pub fn new(default_region: impl Into<String>, default_category: impl Into<String>) -> Self {
        let defaults = HashMap::from([
            (SettingKey::WeatherRegion, default_region.into()),
            (SettingKey::NewsCategory, default_category.into()),
        ]);
        Self {
            defaults,
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: SettingKey) -> String {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .cloned()
            .unwrap_or_default()
    }

    fn set(&self, key: SettingKey, value: String) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key, value);
    }
}
