use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::news::{MAX_NEWS_ITEMS, NewsItem, NewsSource, truncate_summary};

/// Alpha Vantage `NEWS_SENTIMENT` client.
pub struct AlphaVantageNewsProvider {
    base_url: String,
    api_key: String,
    topic: String,
    client: reqwest::Client,
}

impl AlphaVantageNewsProvider {
    pub fn new(base_url: &str, api_key: &str, topic: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxdash/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            topic: topic.to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    feed: Option<Vec<FeedItem>>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    summary: String,
}

impl From<FeedItem> for NewsItem {
    fn from(item: FeedItem) -> Self {
        NewsItem {
            title: item.title,
            url: item.url,
            source: item.source,
            summary: truncate_summary(&item.summary),
        }
    }
}

#[async_trait]
impl NewsSource for AlphaVantageNewsProvider {
    #[instrument(name = "NewsFetch", skip(self), fields(topic = %self.topic))]
    async fn fetch_news(&self) -> Result<Vec<NewsItem>> {
        let url = Url::parse_with_params(
            &format!("{}/query", self.base_url),
            &[
                ("function", "NEWS_SENTIMENT"),
                ("topic", self.topic.as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .with_context(|| format!("Invalid news base url: {}", self.base_url))?;
        debug!("Requesting news from {}/query", self.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for news topic: {}", e.without_url(), self.topic))?;

        if response.status() != StatusCode::OK {
            return Err(anyhow!(
                "HTTP error: {} for news topic: {}",
                response.status(),
                self.topic
            ));
        }

        let text = response.text().await?;
        let data: NewsResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse news response: {}", e))?;

        let Some(feed) = data.feed else {
            if let Some(info) = &data.information {
                warn!(info = %info, "News provider returned a notice instead of a feed");
            }
            return Err(anyhow!("No feed found for news topic: {}", self.topic));
        };

        let items: Vec<NewsItem> = feed
            .into_iter()
            .take(MAX_NEWS_ITEMS)
            .map(NewsItem::from)
            .collect();
        debug!(count = items.len(), "Received news items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "NEWS_SENTIMENT"))
            .and(query_param("topic", "forex"))
            .and(query_param("apikey", "news-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(mock_server: &MockServer) -> AlphaVantageNewsProvider {
        AlphaVantageNewsProvider::new(
            &mock_server.uri(),
            "news-key",
            "forex",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn feed_item(i: usize, summary: &str) -> String {
        format!(
            r#"{{"title": "Headline {i}", "url": "https://news.example/{i}", "source": "Wire", "summary": "{summary}"}}"#
        )
    }

    #[tokio::test]
    async fn test_keeps_first_five_items() {
        let items: Vec<String> = (0..8).map(|i| feed_item(i, "short")).collect();
        let mock_response = format!(r#"{{"items": "8", "feed": [{}]}}"#, items.join(","));

        let mock_server = create_mock_server(&mock_response).await;
        let news = provider(&mock_server).fetch_news().await.unwrap();

        assert_eq!(news.len(), MAX_NEWS_ITEMS);
        assert_eq!(news[0].title, "Headline 0");
        assert_eq!(news[4].url, "https://news.example/4");
        assert_eq!(news[0].source, "Wire");
        assert_eq!(news[0].summary, "short...");
    }

    #[tokio::test]
    async fn test_truncates_long_summaries() {
        let long = "a".repeat(180);
        let mock_response = format!(r#"{{"feed": [{}]}}"#, feed_item(0, &long));

        let mock_server = create_mock_server(&mock_response).await;
        let news = provider(&mock_server).fetch_news().await.unwrap();

        assert_eq!(news[0].summary, format!("{}...", "a".repeat(100)));
    }

    #[tokio::test]
    async fn test_non_ok_status_is_error() {
        let mock_response = format!(r#"{{"feed": [{}]}}"#, feed_item(0, "x"));
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(203).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server).fetch_news().await;

        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("HTTP error: 203")
        );
    }

    #[tokio::test]
    async fn test_missing_feed_is_error() {
        let mock_response = r#"{"Information": "API rate limit reached"}"#;

        let mock_server = create_mock_server(mock_response).await;
        let result = provider(&mock_server).fetch_news().await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "No feed found for news topic: forex"
        );
    }

    #[tokio::test]
    async fn test_missing_item_fields_default_to_empty() {
        let mock_response = r#"{"feed": [{"title": "Only a title"}]}"#;

        let mock_server = create_mock_server(mock_response).await;
        let news = provider(&mock_server).fetch_news().await.unwrap();

        assert_eq!(news[0].title, "Only a title");
        assert_eq!(news[0].url, "");
        assert_eq!(news[0].summary, "...");
    }
}
