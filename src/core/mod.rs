//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod history;
pub mod log;
pub mod news;
pub mod rates;
pub mod trend;

// Re-export main types for cleaner imports
pub use history::{HistoryLog, HistoryRecord, RecordDetails};
pub use news::{NewsItem, NewsSource};
pub use rates::{RateSnapshot, RateSource, Rates};
