//! News feed abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Feed items kept per fetch.
pub const MAX_NEWS_ITEMS: usize = 5;

/// Characters of the summary kept before the ellipsis.
pub const SUMMARY_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: String,
}

/// Cuts a summary to [`SUMMARY_CHARS`] characters and appends `...`.
pub fn truncate_summary(summary: &str) -> String {
    let mut short: String = summary.chars().take(SUMMARY_CHARS).collect();
    short.push_str("...");
    short
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_summary() {
        let long = "x".repeat(250);
        let short = truncate_summary(&long);
        assert_eq!(short.len(), SUMMARY_CHARS + 3);
        assert!(short.ends_with("..."));

        // Short summaries still get the marker
        assert_eq!(truncate_summary("Dollar slips"), "Dollar slips...");
        assert_eq!(truncate_summary(""), "...");
    }

    #[test]
    fn test_truncate_summary_counts_chars_not_bytes() {
        let text = "汇".repeat(120);
        let short = truncate_summary(&text);
        assert_eq!(short.chars().count(), SUMMARY_CHARS + 3);
    }
}
