//! Exchange rate abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency code to units per one USD.
pub type Rates = BTreeMap<String, f64>;

/// Used when no snapshot has ever been fetched.
pub const DEFAULT_RATES: [(&str, f64); 10] = [
    ("USD", 1.0),
    ("CNY", 7.25),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 150.0),
    ("HKD", 7.82),
    ("AUD", 1.52),
    ("CAD", 1.36),
    ("SGD", 1.35),
    ("CHF", 0.88),
];

pub fn default_rates() -> Rates {
    DEFAULT_RATES
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect()
}

fn success() -> String {
    "success".to_string()
}

/// The last successful rate fetch. Serialized in the provider's own shape so
/// the file on disk reads like an ExchangeRate-API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    #[serde(default = "success")]
    pub result: String,
    #[serde(rename = "time_last_update_unix", default)]
    pub provider_updated_unix: i64,
    #[serde(default)]
    pub fetched_at_unix: i64,
    #[serde(rename = "conversion_rates")]
    pub rates: Rates,
}

impl RateSnapshot {
    pub fn new(fetched_at_unix: i64, provider_updated_unix: i64, rates: Rates) -> Self {
        Self {
            result: success(),
            provider_updated_unix,
            fetched_at_unix,
            rates,
        }
    }

    pub fn is_fresh(&self, now_unix: i64, ttl_secs: i64) -> bool {
        now_unix - self.fetched_at_unix < ttl_secs
    }
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the full table of rates quoted against `base`.
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot>;
}
