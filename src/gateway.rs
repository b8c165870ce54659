//! HTTP fetch gateway shared by the three providers
//!
//! Every provider call goes through [`JsonFetcher`], so status handling is
//! uniform: non-2xx answers become [`AtlasError::Http`] with the status kept
//! as data, transport failures become [`AtlasError::Network`].

use crate::config::HttpConfig;
use crate::{AtlasError, Result};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Query parameters that carry credentials and must not reach the logs
const SECRET_PARAMS: [&str; 2] = ["appid", "client_id"];

/// Source of JSON documents addressed by URL
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// reqwest-backed gateway used in production
pub struct HttpGateway {
    client: ClientWithMiddleware,
}

impl HttpGateway {
    /// Create a new gateway from the shared HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AtlasError::config(format!("Failed to create HTTP client: {e}")))?;

        let mut builder = ClientBuilder::new(client);
        if config.max_retries > 0 {
            let policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(policy));
        }

        Ok(Self {
            client: builder.build(),
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpGateway {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let safe_url = redact_url(url);
        let start = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", safe_url, e);
            AtlasError::from(e)
        })?;

        let status = response.status();
        debug!(
            "{} -> {} in {:.3}s",
            safe_url,
            status.as_u16(),
            start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(AtlasError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
                safe_url,
            ));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| AtlasError::decode(format!("Invalid JSON from {safe_url}: {e}")))
    }
}

/// Convert a fetched document into a typed provider payload.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| AtlasError::decode(format!("Unexpected {what} payload: {e}")))
}

/// Replace credential values in a URL's query string with `***`.
#[must_use]
pub fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_PARAMS.contains(&key) => format!("{key}=***"),
            _ => pair.to_string(),
        })
        .collect();

    format!("{base}?{}", params.join("&"))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_hides_credentials() {
        let url = "https://api.openweathermap.org/data/2.5/weather?lat=1&lon=2&appid=secret";
        assert_eq!(
            redact_url(url),
            "https://api.openweathermap.org/data/2.5/weather?lat=1&lon=2&appid=***"
        );

        let url = "https://api.unsplash.com/search/photos?query=Peru&client_id=abc&per_page=1";
        assert!(!redact_url(url).contains("abc"));
    }

    #[test]
    fn test_redact_url_without_query() {
        assert_eq!(
            redact_url("https://restcountries.com/v3.1/all"),
            "https://restcountries.com/v3.1/all"
        );
    }

    #[test]
    fn test_decode_reports_payload_kind() {
        let err = decode::<Vec<String>>(serde_json::json!({"a": 1}), "country list").unwrap_err();
        assert!(matches!(err, AtlasError::Decode { .. }));
        assert!(err.to_string().contains("country list"));
    }

    #[test]
    fn test_gateway_builds_with_retries() {
        let config = HttpConfig {
            max_retries: 2,
            ..HttpConfig::default()
        };
        assert!(HttpGateway::new(&config).is_ok());
    }
}
