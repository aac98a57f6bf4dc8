//! Simulated daily series for a currency pair.
//!
//! The rate provider's free tier has no history endpoint, so the series is
//! generated around today's cross rate with up to 2% noise per day.

use crate::core::conversion::round_to;
use crate::core::rates::Rates;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Longest series the simulator will generate.
pub const MAX_TREND_DAYS: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    /// Current cross rate: units of target per one unit of base.
    pub rate: f64,
}

/// Generates one point per day for the `days` days before `today`, capped at
/// [`MAX_TREND_DAYS`]. Days that fall outside the calendar are skipped.
pub fn simulate_trend<R: Rng>(
    rates: &Rates,
    base: &str,
    target: &str,
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> TrendSeries {
    let base_rate = rates.get(base).copied().unwrap_or(1.0);
    let target_rate = rates.get(target).copied().unwrap_or(1.0);
    let rate = target_rate / base_rate;
    let days = days.min(MAX_TREND_DAYS);

    let (labels, data) = (0..days)
        .filter_map(|i| {
            let day = today.checked_sub_signed(Duration::days(i64::from(days - i)))?;
            let fluctuation = rng.gen_range(0.98..=1.02);
            Some((
                day.format("%Y-%m-%d").to_string(),
                round_to(rate * fluctuation, 4),
            ))
        })
        .unzip();

    TrendSeries { labels, data, rate }
}
