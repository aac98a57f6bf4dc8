//! The exchange service: rate and news caches plus the action history.
//!
//! One instance is built at start-up and handed to every command.

use crate::core::config::{AppConfig, CacheConfig};
use crate::core::history::HistoryLog;
use crate::core::news::{NewsItem, NewsSource};
use crate::core::rates::{RateSnapshot, RateSource, Rates, default_rates};
use crate::core::trend::{TrendSeries, simulate_trend};
use crate::providers::{AlphaVantageNewsProvider, ExchangeRateApiProvider};
use crate::store::JsonFile;
use anyhow::Result;
use chrono::{Local, Utc};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const RATES_FILE: &str = "daily_rates.json";
pub const HISTORY_FILE: &str = "history_records.json";

/// Rates are always fetched quoted against this currency.
pub const BASE_CURRENCY: &str = "USD";

#[derive(Default)]
struct NewsCache {
    items: Vec<NewsItem>,
    fetched_at_unix: i64,
}

pub struct ExchangeService {
    rate_source: Arc<dyn RateSource>,
    news_source: Arc<dyn NewsSource>,
    rates_file: JsonFile,
    rates: Mutex<Option<RateSnapshot>>,
    news: Mutex<NewsCache>,
    history: HistoryLog,
    rates_ttl_secs: i64,
    news_ttl_secs: i64,
}

impl ExchangeService {
    /// Creates the service and loads the last rate snapshot from `data_dir`.
    pub fn new(
        rate_source: Arc<dyn RateSource>,
        news_source: Arc<dyn NewsSource>,
        data_dir: &Path,
        cache: &CacheConfig,
    ) -> Self {
        let rates_file = JsonFile::new(data_dir.join(RATES_FILE));
        let snapshot: Option<RateSnapshot> = rates_file.load();
        match &snapshot {
            Some(s) => debug!(fetched_at = s.fetched_at_unix, "Loaded rate snapshot from disk"),
            None => debug!("No rate snapshot on disk"),
        }

        Self {
            rate_source,
            news_source,
            rates_file,
            rates: Mutex::new(snapshot),
            news: Mutex::new(NewsCache::default()),
            history: HistoryLog::new(JsonFile::new(data_dir.join(HISTORY_FILE))),
            rates_ttl_secs: cache.rates_ttl_secs,
            news_ttl_secs: cache.news_ttl_secs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let rates = &config.providers.exchange_rate;
        let news = &config.providers.news;

        let rate_source = ExchangeRateApiProvider::new(&rates.base_url, &rates.api_key, timeout)?;
        let news_source =
            AlphaVantageNewsProvider::new(&news.base_url, &news.api_key, &news.topic, timeout)?;

        let data_dir = config.default_data_path()?;
        info!(data_dir = %data_dir.display(), "Exchange service starting");

        Ok(Self::new(
            Arc::new(rate_source),
            Arc::new(news_source),
            &data_dir,
            &config.cache,
        ))
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Current rates against USD. Never fails: a fresh snapshot is reused,
    /// else one fetch is tried, else the last snapshot however old, else the
    /// built-in defaults.
    pub async fn get_rates(&self) -> Rates {
        self.rates_at(Utc::now().timestamp()).await
    }

    pub async fn rates_at(&self, now_unix: i64) -> Rates {
        {
            let cached = self.rates.lock().await;
            if let Some(snapshot) = cached.as_ref() {
                if snapshot.is_fresh(now_unix, self.rates_ttl_secs) {
                    debug!("Rates cache HIT");
                    return snapshot.rates.clone();
                }
            }
        }
        debug!("Rates cache MISS");

        // The lock is released during the fetch; concurrent callers may each fetch.
        match self.rate_source.fetch_latest(BASE_CURRENCY).await {
            Ok(mut snapshot) => {
                snapshot.fetched_at_unix = now_unix;
                if let Err(e) = self.rates_file.save(&snapshot) {
                    warn!(error = %e, "Failed to persist rate snapshot");
                }
                let rates = snapshot.rates.clone();
                *self.rates.lock().await = Some(snapshot);
                return rates;
            }
            Err(e) => warn!(error = %e, "Rate fetch failed, using fallback"),
        }

        match self.rates.lock().await.as_ref() {
            Some(snapshot) => {
                debug!(fetched_at = snapshot.fetched_at_unix, "Serving stale rates");
                snapshot.rates.clone()
            }
            None => {
                debug!("Serving default rates");
                default_rates()
            }
        }
    }

    /// Latest headlines. Never fails; an empty list means nothing was ever
    /// fetched.
    pub async fn get_news(&self) -> Vec<NewsItem> {
        self.news_at(Utc::now().timestamp()).await
    }

    pub async fn news_at(&self, now_unix: i64) -> Vec<NewsItem> {
        {
            let cached = self.news.lock().await;
            if !cached.items.is_empty() && now_unix - cached.fetched_at_unix < self.news_ttl_secs {
                debug!("News cache HIT");
                return cached.items.clone();
            }
        }
        debug!("News cache MISS");

        match self.news_source.fetch_news().await {
            Ok(items) => {
                let mut cached = self.news.lock().await;
                cached.items = items.clone();
                cached.fetched_at_unix = now_unix;
                items
            }
            Err(e) => {
                warn!(error = %e, "News fetch failed, using fallback");
                self.news.lock().await.items.clone()
            }
        }
    }

    /// Simulated daily series for `base`/`target` over the last `days` days.
    pub async fn get_trend(&self, base: &str, target: &str, days: u32) -> TrendSeries {
        let rates = self.get_rates().await;
        let today = Local::now().date_naive();
        simulate_trend(&rates, base, target, days, today, &mut rand::thread_rng())
    }
}
