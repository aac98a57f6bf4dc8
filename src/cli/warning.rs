use super::{record_action, ui};
use crate::core::conversion::parse_amount;
use crate::core::history::record_type;
use crate::service::ExchangeService;
use anyhow::Result;
use clap::ValueEnum;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WarningCondition {
    Above,
    Below,
}

impl Display for WarningCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WarningCondition::Above => "above",
                WarningCondition::Below => "below",
            }
        )
    }
}

/// Text stored in history for a warning.
pub fn describe(pair: &str, condition: WarningCondition, threshold: f64) -> String {
    format!(
        "Alert when {pair} {condition} {}",
        format_threshold(threshold)
    )
}

/// Whole numbers keep one decimal place, so `1` reads as `1.0`.
fn format_threshold(threshold: f64) -> String {
    if threshold.is_finite() && threshold.fract() == 0.0 {
        format!("{threshold:.1}")
    } else {
        threshold.to_string()
    }
}

/// Records a rate warning. Warnings are kept in history only; nothing
/// evaluates them against live rates.
pub async fn run(
    service: &ExchangeService,
    pair: &str,
    condition: WarningCondition,
    threshold: &str,
) -> Result<()> {
    let threshold = parse_amount(threshold, "threshold")?;
    let details = describe(&pair.trim().to_uppercase(), condition, threshold);

    record_action(service.history(), record_type::WARNING, details.clone()).await;

    println!(
        "Warning set: {}",
        ui::style_text(&details, ui::StyleType::TotalLabel)
    );
    Ok(())
}
