use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::StatusCode;
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::rates::{RateSnapshot, RateSource, Rates};

/// ExchangeRate-API v6 client (`{base_url}/{api_key}/latest/{base}`).
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxdash/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    time_last_update_unix: i64,
    conversion_rates: Option<Rates>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot> {
        let url = format!("{}/{}/latest/{}", self.base_url, self.api_key, base);
        debug!("Requesting latest rates from {}/***/latest/{}", self.base_url, base);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e.without_url(), base))?;

        if response.status() != StatusCode::OK {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        if data.result != "success" {
            return Err(anyhow!(
                "Provider reported {}: {}",
                data.result,
                data.error_type.as_deref().unwrap_or("unknown error")
            ));
        }

        let rates = data
            .conversion_rates
            .ok_or_else(|| anyhow!("No conversion rates found for base currency: {}", base))?;
        debug!(count = rates.len(), "Received conversion rates");

        Ok(RateSnapshot::new(
            Utc::now().timestamp(),
            data.time_last_update_unix,
            rates,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    async fn create_mock_server(status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/{API_KEY}/latest/USD");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(mock_server: &MockServer) -> ExchangeRateApiProvider {
        ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000001,
            "conversion_rates": {
                "USD": 1,
                "CNY": 7.2416,
                "EUR": 0.9311
            }
        }"#;

        let mock_server = create_mock_server(200, mock_response).await;
        let snapshot = provider(&mock_server).fetch_latest("USD").await.unwrap();

        assert_eq!(snapshot.provider_updated_unix, 1_700_000_001);
        assert_eq!(snapshot.rates.len(), 3);
        assert_eq!(snapshot.rates["USD"], 1.0);
        assert_eq!(snapshot.rates["CNY"], 7.2416);
        assert!(snapshot.fetched_at_unix > 0);
    }

    #[tokio::test]
    async fn test_provider_reported_error() {
        let mock_response = r#"{"result": "error", "error-type": "invalid-key"}"#;

        let mock_server = create_mock_server(200, mock_response).await;
        let result = provider(&mock_server).fetch_latest("USD").await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Provider reported error: invalid-key"
        );
    }

    #[tokio::test]
    async fn test_missing_conversion_rates() {
        let mock_response = r#"{"result": "success", "time_last_update_unix": 1}"#;

        let mock_server = create_mock_server(200, mock_response).await;
        let result = provider(&mock_server).fetch_latest("USD").await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "No conversion rates found for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = create_mock_server(500, "").await;
        let result = provider(&mock_server).fetch_latest("USD").await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_non_ok_success_status_is_error() {
        let mock_response = r#"{"result": "success", "conversion_rates": {"USD": 1}}"#;

        let mock_server = create_mock_server(203, mock_response).await;
        let result = provider(&mock_server).fetch_latest("USD").await;

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("HTTP error: 203"), "{message}");
        assert!(message.ends_with("for base currency: USD"));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(200, "<html>maintenance</html>").await;
        let result = provider(&mock_server).fetch_latest("USD").await;

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for USD")
        );
    }
}
