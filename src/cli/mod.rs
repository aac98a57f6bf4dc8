//! Terminal front end. Each command fetches through the shared
//! [`ExchangeService`](crate::service::ExchangeService), does its arithmetic
//! and prints a table.

pub mod compare;
pub mod convert;
pub mod dashboard;
pub mod history;
pub mod news;
pub mod price;
pub mod rates;
pub mod setup;
pub mod trend;
pub mod ui;
pub mod warning;

use crate::core::history::{HistoryLog, RecordDetails};
use tracing::warn;

/// Currency codes are accepted in any case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Logs an action to history. A failed write is reported but does not undo
/// the result the user already has.
pub(crate) async fn record_action(
    history: &HistoryLog,
    record_type: &str,
    details: impl Into<RecordDetails>,
) {
    if let Err(e) = history.add_record(record_type, details).await {
        warn!(error = %e, record_type, "Failed to record history");
        eprintln!(
            "{}",
            ui::style_text(&format!("Could not save history: {e}"), ui::StyleType::Error)
        );
    }
}
