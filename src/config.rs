//! # Configuration
//!
//! Settings are layered, last one wins:
//!
//! 1. built-in defaults ([`Settings::default`]),
//! 2. `config/base.toml` (optional),
//! 3. `config/<RUN_MODE>.toml` where `RUN_MODE` is `development` (default), `test` or
//!    `production` (optional),
//! 4. environment variables prefixed `FASTFOOD__`, e.g. `FASTFOOD__API__BASE_URL`.

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Test,
    Production,
}

impl RunMode {
    pub fn from_env() -> Self {
        match env::var("RUN_MODE") {
            Ok(ref s) if s == "test" => RunMode::Test,
            Ok(ref s) if s == "production" => RunMode::Production,
            _ => RunMode::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Test => "test",
            RunMode::Production => "production",
        }
    }
}

/// Backend REST settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Gateway origin; `/api` is appended by [`ApiSettings::api_root`].
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl ApiSettings {
    pub fn api_root(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Geocoding provider and autocomplete tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub country_code: String,
    pub suggestion_limit: usize,
    pub min_query_chars: usize,
    pub debounce_ms: u64,
}

impl GeocoderSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Guest cart persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    pub storage_key: String,
    /// Directory for file-backed storage. `None` keeps the cart in memory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSettings {
    pub buffer_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub geocoder: GeocoderSettings,
    pub cart: CartSettings,
    pub actors: ActorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: 120,
                bearer_token: None,
            },
            geocoder: GeocoderSettings {
                base_url: "https://nominatim.openstreetmap.org".to_string(),
                user_agent: "FastFood-Delivery-App".to_string(),
                accept_language: "vi".to_string(),
                country_code: "vn".to_string(),
                suggestion_limit: 10,
                min_query_chars: 3,
                debounce_ms: 500,
            },
            cart: CartSettings {
                storage_key: "shopping_cart".to_string(),
                storage_dir: None,
            },
            actors: ActorSettings { buffer_size: 32 },
        }
    }
}

impl Settings {
    /// Load settings from `config/` relative to the working directory plus the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config", RunMode::from_env())
    }

    pub fn load_from(dir: &str, mode: RunMode) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Settings::default())?;
        Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(&format!("{}/base", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, mode.as_str())).required(false))
            .add_source(
                Environment::with_prefix("FASTFOOD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
