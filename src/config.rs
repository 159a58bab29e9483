use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub favorites: FavoritesConfig,
    pub catalog: CatalogConfig,
}

/// Backend API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Bearer token sent with every request, if set.
    pub token: Option<String>,
}

/// Optimistic favorites behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// How long a key stays pending after a toggle, in milliseconds.
    pub debounce_ms: u64,
}

/// Catalog browsing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub page_size: u32,
    /// Destination filter applied to every search, if set.
    pub destination: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: crate::core::catalog::DEFAULT_PAGE_SIZE,
            destination: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/tourdesk/config.toml`, then
    /// `TOURDESK_*` environment variables (`__` separates sections, e.g.
    /// `TOURDESK_API__BASE_URL`).
    /// Returns `Default` if the sources cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Like [`AppConfig::load`] with an explicit file path.
    pub fn load_from(path: &Path) -> Self {
        match Self::figment(path).extract() {
            Ok(config) => {
                if path.exists() {
                    tracing::info!("Loaded config from {}", path.display());
                } else {
                    tracing::debug!("No config file at {}, using defaults", path.display());
                }
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse config at {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TOURDESK_").split("__"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("tourdesk").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
