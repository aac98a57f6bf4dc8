//! Rate arithmetic: conversion, supplier cost comparison and sale pricing.
//!
//! All functions are pure over a [`Rates`] table where `rates[X]` is the
//! number of X units one USD buys. Batch functions take raw text for the
//! numeric column of each row and drop rows that fail to parse.

use crate::core::rates::Rates;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Currency that purchase costs and sale prices are expressed in.
pub const HOME_CURRENCY: &str = "CNY";

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Parses a top-level numeric input. Unlike batch rows, a bad value here
/// rejects the whole operation.
pub fn parse_amount(raw: &str, field: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| anyhow!("Invalid {}: {}", field, raw))
}

/// Converts `amount` between two currencies through USD. Returns 0.0 when
/// either code is missing from `rates`.
pub fn convert(amount: f64, from: &str, to: &str, rates: &Rates) -> f64 {
    match (rates.get(from), rates.get(to)) {
        (Some(from_rate), Some(to_rate)) => round_to(amount / from_rate * to_rate, 6),
        _ => 0.0,
    }
}

fn rate_or_one(rates: &Rates, code: &str) -> f64 {
    rates.get(code).copied().unwrap_or(1.0)
}

fn checked_div(value: f64, rate: f64) -> Option<f64> {
    (rate != 0.0).then(|| value / rate)
}

fn parse_row_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionQuote {
    pub amount: f64,
    pub currency: String,
    pub cost_cny: f64,
    pub is_best: bool,
}

/// Prices each `(amount, currency)` quote in CNY and flags the cheapest.
///
/// Currencies missing from `rates` are taken at 1.0. Every quote matching the
/// minimum exactly is flagged, so ties are all best.
pub fn compare_costs(rows: &[(String, String)], rates: &Rates) -> Vec<ConversionQuote> {
    let cny_rate = rate_or_one(rates, HOME_CURRENCY);

    let mut quotes: Vec<ConversionQuote> = rows
        .iter()
        .filter_map(|(raw_amount, currency)| {
            let amount = parse_row_number(raw_amount)?;
            let usd = checked_div(amount, rate_or_one(rates, currency))?;
            Some(ConversionQuote {
                amount,
                currency: currency.clone(),
                cost_cny: round_to(usd * cny_rate, 2),
                is_best: false,
            })
        })
        .collect();

    if let Some(min_cost) = quotes.iter().map(|q| q.cost_cny).reduce(f64::min) {
        for quote in quotes.iter_mut() {
            quote.is_best = quote.cost_cny == min_cost;
        }
    }

    quotes
}

/// Lowest CNY cost among `quotes`, or 0 when there are none.
pub fn best_cost(quotes: &[ConversionQuote]) -> f64 {
    quotes
        .iter()
        .map(|q| q.cost_cny)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub market: String,
    pub margin_percent: f64,
    pub price_local: f64,
    pub price_cny: f64,
}

/// Suggests a sale price per `(market, margin percent)` row for goods that
/// cost `cost_cny`.
pub fn suggest_prices(
    cost_cny: f64,
    rows: &[(String, String)],
    rates: &Rates,
) -> Vec<PriceSuggestion> {
    let cny_rate = rate_or_one(rates, HOME_CURRENCY);

    rows.iter()
        .filter_map(|(market, raw_margin)| {
            let margin_percent = parse_row_number(raw_margin)?;
            let target_cny = cost_cny * (1.0 + margin_percent / 100.0);
            let usd = checked_div(target_cny, cny_rate)?;
            let local = usd * rate_or_one(rates, market);
            Some(PriceSuggestion {
                market: market.clone(),
                margin_percent,
                price_local: round_to(local, 2),
                price_cny: round_to(target_cny, 2),
            })
        })
        .collect()
}
