//! Log of user actions, newest first, kept in one JSON file.

use crate::store::JsonFile;
use anyhow::Result;
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;
use tokio::sync::Mutex;
use tracing::debug;

pub mod record_type {
    pub const CONVERT: &str = "convert";
    pub const PURCHASE_COST_COMPARE: &str = "purchase_cost_compare";
    pub const SMART_PRICING: &str = "smart_pricing";
    pub const WARNING: &str = "warning";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordDetails {
    Text(String),
    Fields(Map<String, Value>),
}

impl From<&str> for RecordDetails {
    fn from(text: &str) -> Self {
        RecordDetails::Text(text.to_string())
    }
}

impl From<String> for RecordDetails {
    fn from(text: String) -> Self {
        RecordDetails::Text(text)
    }
}

impl From<Map<String, Value>> for RecordDetails {
    fn from(fields: Map<String, Value>) -> Self {
        RecordDetails::Fields(fields)
    }
}

impl Display for RecordDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordDetails::Text(text) => write!(f, "{text}"),
            RecordDetails::Fields(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(key, value)| match value {
                        Value::String(s) => format!("{key}: {s}"),
                        other => format!("{key}: {other}"),
                    })
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Creation time in epoch milliseconds. Not unique under sub-millisecond
    /// writes.
    pub id: i64,
    #[serde(rename = "date")]
    pub created_at: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub details: RecordDetails,
}

pub struct HistoryLog {
    file: JsonFile,
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(file: JsonFile) -> Self {
        Self {
            file,
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Vec<HistoryRecord> {
        self.file.load().unwrap_or_default()
    }

    /// Prepends a record and rewrites the whole file.
    pub async fn add_record(
        &self,
        record_type: &str,
        details: impl Into<RecordDetails>,
    ) -> Result<HistoryRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all();

        let record = HistoryRecord {
            id: Utc::now().timestamp_millis(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            record_type: record_type.to_string(),
            details: details.into(),
        };
        records.insert(0, record.clone());
        self.file.save(&records)?;

        debug!(id = record.id, record_type, "History record added");
        Ok(record)
    }

    /// Returns all records, or only those of `filter_type`, newest first.
    pub async fn list_records(&self, filter_type: Option<&str>) -> Vec<HistoryRecord> {
        let _guard = self.write_lock.lock().await;
        let records = self.read_all();
        match filter_type {
            Some(wanted) => records
                .into_iter()
                .filter(|r| r.record_type == wanted)
                .collect(),
            None => records,
        }
    }

    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.file.save(&Vec::<HistoryRecord>::new())?;
        debug!("History cleared");
        Ok(())
    }
}
