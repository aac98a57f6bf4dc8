pub mod cli;
pub mod core;
pub mod providers;
pub mod service;
pub mod store;

use crate::cli::warning::WarningCondition;
use crate::core::config::AppConfig;
use crate::service::ExchangeService;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates,
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Compare {
        amounts: Vec<String>,
        currencies: Vec<String>,
    },
    Price {
        cost: String,
        markets: Vec<String>,
        margins: Vec<String>,
    },
    News,
    Trend {
        base: String,
        target: String,
        days: u32,
    },
    Warn {
        pair: String,
        condition: WarningCondition,
        threshold: String,
    },
    History {
        record_type: Option<String>,
    },
    ClearHistory,
    Dashboard,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxdash starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(cache = ?config.cache, data_path = ?config.data_path, "Loaded config");

    let service = ExchangeService::from_config(&config)?;

    match command {
        AppCommand::Rates => cli::rates::run(&service, &config.currencies).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&service, amount, &from, &to).await
        }
        AppCommand::Compare {
            amounts,
            currencies,
        } => cli::compare::run(&service, &amounts, &currencies).await,
        AppCommand::Price {
            cost,
            markets,
            margins,
        } => cli::price::run(&service, &cost, &markets, &margins).await,
        AppCommand::News => cli::news::run(&service).await,
        AppCommand::Trend { base, target, days } => {
            cli::trend::run(&service, &base, &target, days).await
        }
        AppCommand::Warn {
            pair,
            condition,
            threshold,
        } => cli::warning::run(&service, &pair, condition, &threshold).await,
        AppCommand::History { record_type } => {
            cli::history::list(&service, record_type.as_deref()).await
        }
        AppCommand::ClearHistory => cli::history::clear(&service).await,
        AppCommand::Dashboard => cli::dashboard::run(&service, &config.currencies).await,
    }
}
