use std::time::Duration;

use paystat_core::config::DEFAULT_TIMEOUT;
use paystat_core::error::AppError;
use paystat_core::models::ApiRequest;
use paystat_core::traits::Fetcher;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

const USER_AGENT: &str = concat!("paystat/", env!("CARGO_PKG_VERSION"));

/// HTTP fetcher using reqwest.
///
/// Every request is bounded by the configured timeout; HeadHunter rejects
/// requests without a User-Agent, so one is always sent.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, request: &ApiRequest) -> Result<String, AppError> {
        let url = build_url(request)?;
        let headers = build_headers(&request.headers)?;

        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                request.url
            )));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout)
            } else {
                AppError::HttpError(format!("Failed to read response body: {e}"))
            }
        })
    }
}

/// Base URL with the request's query pairs appended, repeated keys kept.
fn build_url(request: &ApiRequest) -> Result<Url, AppError> {
    Url::parse_with_params(&request.url, &request.query)
        .map_err(|e| AppError::HttpError(format!("Invalid URL '{}': {e}", request.url)))
}

fn build_headers(pairs: &[(String, String)]) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::HttpError(format!("Invalid header name '{name}': {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| AppError::HttpError(format!("Invalid value for header '{name}': {e}")))?;
        value.set_sensitive(true);
        headers.insert(name, value);
    }
    Ok(headers)
}
