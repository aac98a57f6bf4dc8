use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const EXCHANGE_API_KEY_ENV: &str = "EXCHANGE_API_KEY";
pub const ALPHAVANTAGE_API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        ExchangeRateProviderConfig {
            base_url: "https://v6.exchangerate-api.com/v6".to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewsProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_news_topic")]
    pub topic: String,
}

fn default_news_topic() -> String {
    "forex".to_string()
}

impl Default for NewsProviderConfig {
    fn default() -> Self {
        NewsProviderConfig {
            base_url: "https://www.alphavantage.co".to_string(),
            api_key: String::new(),
            topic: default_news_topic(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub exchange_rate: ExchangeRateProviderConfig,
    #[serde(default)]
    pub news: NewsProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_rates_ttl")]
    pub rates_ttl_secs: i64,
    #[serde(default = "default_news_ttl")]
    pub news_ttl_secs: i64,
}

fn default_rates_ttl() -> i64 {
    300
}

fn default_news_ttl() -> i64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            rates_ttl_secs: default_rates_ttl(),
            news_ttl_secs: default_news_ttl(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Currencies shown by default in the rates table.
pub const DISPLAY_CURRENCIES: [&str; 20] = [
    "USD", "CNY", "EUR", "GBP", "JPY", "HKD", "AUD", "CAD", "SGD", "CHF", "INR", "RUB", "KRW",
    "THB", "VND", "MYR", "IDR", "PHP", "TWD", "NZD",
];

fn default_currencies() -> Vec<String> {
    DISPLAY_CURRENCIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    pub data_path: Option<String>,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            cache: CacheConfig::default(),
            request_timeout_secs: default_timeout(),
            data_path: None,
            currencies: default_currencies(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default().with_env_keys());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxdash", "fxdash")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "fxdash", "fxdash")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config.with_env_keys())
    }

    /// Fills empty api keys from the environment.
    fn with_env_keys(mut self) -> Self {
        if self.providers.exchange_rate.api_key.is_empty() {
            if let Ok(key) = std::env::var(EXCHANGE_API_KEY_ENV) {
                self.providers.exchange_rate.api_key = key;
            }
        }
        if self.providers.news.api_key.is_empty() {
            if let Ok(key) = std::env::var(ALPHAVANTAGE_API_KEY_ENV) {
                self.providers.news.api_key = key;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  exchange_rate:
    base_url: "http://example.com/rates"
    api_key: "rates-key"
  news:
    base_url: "http://example.com/news"
    api_key: "news-key"
    topic: "economy_macro"
cache:
  rates_ttl_secs: 60
  news_ttl_secs: 120
request_timeout_secs: 5
data_path: "/tmp/fxdash"
currencies: ["USD", "EUR"]
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "http://example.com/rates"
        );
        assert_eq!(config.providers.exchange_rate.api_key, "rates-key");
        assert_eq!(config.providers.news.base_url, "http://example.com/news");
        assert_eq!(config.providers.news.topic, "economy_macro");
        assert_eq!(config.cache.rates_ttl_secs, 60);
        assert_eq!(config.cache.news_ttl_secs, 120);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.data_path.as_deref(), Some("/tmp/fxdash"));
        assert_eq!(config.currencies, vec!["USD", "EUR"]);
    }

    #[test]
    fn test_config_defaults_for_missing_sections() {
        let config: AppConfig = serde_yaml::from_str("data_path: null").unwrap();
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "https://v6.exchangerate-api.com/v6"
        );
        assert_eq!(config.providers.news.base_url, "https://www.alphavantage.co");
        assert_eq!(config.providers.news.topic, "forex");
        assert_eq!(config.cache.rates_ttl_secs, 300);
        assert_eq!(config.cache.news_ttl_secs, 3600);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.currencies.len(), DISPLAY_CURRENCIES.len());
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_custom_data_path_wins() {
        let config = AppConfig {
            data_path: Some("/srv/fxdash".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/srv/fxdash")
        );
    }

    #[test]
    fn test_load_from_path_reports_bad_yaml() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "cache: [not, a, map").unwrap();
        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
