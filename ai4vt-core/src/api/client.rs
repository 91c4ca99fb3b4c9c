//! HTTP client for the prediction API.
//!
//! Two read-only endpoints, no authentication, no query parameters. Each
//! call is a single attempt: the whole body is read, then parsed. Callers
//! decide what a failure means for their UI.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use tracing::{debug, info};

use super::provider::{ApiError, ResultsSource};
use crate::domain::{DailyRecord, Summary};

pub const DEFAULT_API_URL: &str = "https://ai4vt-production.up.railway.app";

/// Blocking client for `GET /results` and `GET /summary/{date}`.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ai4vt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn results_url(&self) -> String {
        format!("{}/results", self.base_url)
    }

    pub fn summary_url(&self, date: NaiveDate) -> String {
        format!("{}/summary/{}", self.base_url, date.format("%Y-%m-%d"))
    }

    /// GET `url` and return the full body of a 2xx response.
    fn get_body(&self, url: &str) -> Result<(StatusCode, String), ApiError> {
        debug!(url, "GET");
        let resp = self.client.get(url).send().map_err(|e| classify(&e))?;
        let status = resp.status();
        let body = resp.text().map_err(|e| classify(&e))?;
        Ok((status, body))
    }
}

impl ResultsSource for ApiClient {
    fn name(&self) -> &str {
        "prediction_api"
    }

    fn fetch_results(&self) -> Result<Vec<DailyRecord>, ApiError> {
        let url = self.results_url();
        let (status, body) = self.get_body(&url)?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let records = parse_results(&body)?;
        info!(count = records.len(), "fetched results");
        Ok(records)
    }

    fn fetch_summary(&self, date: NaiveDate) -> Result<Summary, ApiError> {
        let url = self.summary_url(date);
        let (status, body) = self.get_body(&url)?;
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::SummaryNotFound { date });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        parse_summary(&body)
    }
}

fn classify(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(e.to_string())
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Parse a `/results` body: a JSON array of records.
pub fn parse_results(body: &str) -> Result<Vec<DailyRecord>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("results: {e}")))
}

/// Parse a `/summary/{date}` body: `{ "summary": string }`.
pub fn parse_summary(body: &str) -> Result<Summary, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("summary: {e}")))
}
