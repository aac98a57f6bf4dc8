use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxdash::cli::warning::WarningCondition;
use fxdash::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable debug logging; repeat (-vv) to include HTTP client events
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show current exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        from: String,
        to: String,
    },
    /// Compare supplier quotes in CNY and highlight the cheapest
    Compare {
        /// Quoted amount, repeat once per quote
        #[arg(long = "amount", required = true, allow_hyphen_values = true)]
        amounts: Vec<String>,
        /// Quote currency, repeat once per quote
        #[arg(long = "currency", required = true)]
        currencies: Vec<String>,
    },
    /// Suggest sale prices per market from a CNY cost and margin
    Price {
        /// Cost of goods in CNY
        #[arg(long, allow_hyphen_values = true)]
        cost: String,
        /// Target market currency, repeat once per market
        #[arg(long = "market", required = true)]
        markets: Vec<String>,
        /// Margin in percent, repeat once per market
        #[arg(long = "margin", required = true, allow_hyphen_values = true)]
        margins: Vec<String>,
    },
    /// Show the latest forex news
    News,
    /// Show a simulated daily trend for a currency pair
    Trend {
        #[arg(long, default_value = "USD")]
        base: String,
        #[arg(long, default_value = "CNY")]
        target: String,
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Record a rate warning in history
    Warn {
        /// Currency pair, e.g. USD/CNY
        pair: String,
        #[arg(value_enum)]
        condition: WarningCondition,
        #[arg(allow_hyphen_values = true)]
        threshold: String,
    },
    /// Show or clear the action history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show rates and news together
    Dashboard,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List records, newest first
    List {
        /// Only show records of this type (e.g. convert, warning)
        #[arg(short = 't', long = "type")]
        record_type: Option<String>,
    },
    /// Delete all records
    Clear,
}

impl From<Commands> for fxdash::AppCommand {
    fn from(cmd: Commands) -> fxdash::AppCommand {
        match cmd {
            Commands::Rates => fxdash::AppCommand::Rates,
            Commands::Convert { amount, from, to } => {
                fxdash::AppCommand::Convert { amount, from, to }
            }
            Commands::Compare {
                amounts,
                currencies,
            } => fxdash::AppCommand::Compare {
                amounts,
                currencies,
            },
            Commands::Price {
                cost,
                markets,
                margins,
            } => fxdash::AppCommand::Price {
                cost,
                markets,
                margins,
            },
            Commands::News => fxdash::AppCommand::News,
            Commands::Trend { base, target, days } => {
                fxdash::AppCommand::Trend { base, target, days }
            }
            Commands::Warn {
                pair,
                condition,
                threshold,
            } => fxdash::AppCommand::Warn {
                pair,
                condition,
                threshold,
            },
            Commands::History { action } => match action {
                Some(HistoryAction::Clear) => fxdash::AppCommand::ClearHistory,
                Some(HistoryAction::List { record_type }) => {
                    fxdash::AppCommand::History { record_type }
                }
                None => fxdash::AppCommand::History { record_type: None },
            },
            Commands::Dashboard => fxdash::AppCommand::Dashboard,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxdash::cli::setup::setup(),
        Some(cmd) => fxdash::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
