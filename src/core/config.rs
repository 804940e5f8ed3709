use crate::core::settings::Settings;
use crate::providers::{coingecko, exchange_rate_api};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinGeckoProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
    pub coingecko: Option<CoinGeckoProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate: Some(ExchangeRateProviderConfig {
                base_url: exchange_rate_api::DEFAULT_BASE_URL.to_string(),
            }),
            coingecko: Some(CoinGeckoProviderConfig {
                base_url: coingecko::DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn exchange_rate_url(&self) -> &str {
        self.exchange_rate
            .as_ref()
            .map_or(exchange_rate_api::DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn coingecko_url(&self) -> &str {
        self.coingecko
            .as_ref()
            .map_or(coingecko::DEFAULT_BASE_URL, |p| &p.base_url)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Seconds allowed for a single provider request.
    pub timeout_secs: Option<u64>,
    pub settings_path: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no config file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "skyrate", "skyrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn settings_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.settings_path {
            return Ok(PathBuf::from(custom_path));
        }
        Settings::default_path()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map_or(crate::core::resolver::DEFAULT_TIMEOUT, Duration::from_secs)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
