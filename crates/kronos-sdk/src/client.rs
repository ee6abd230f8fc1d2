//! Kronos client implementation.

use crate::envelope::AnalyzeResponse;
use crate::error::SdkError;
use kronos_domain::{AnalysisRequest, CorrelationResult};
use std::time::Duration;

/// Path of the correlation operation, relative to the backend base URL
const ANALYZE_PATH: &str = "/api/analyze_correlation";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the correlation backend
///
/// One request per call: no retries, no caching.
#[derive(Debug, Clone)]
pub struct CorrelationClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl CorrelationClient {
    /// Create a client for the given backend base URL
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Backend base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the analyze operation
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    /// Run `analyzeCorrelation` for a mission and date range
    ///
    /// # Errors
    ///
    /// - [`SdkError::InvalidRequest`] when the request fails validation
    /// - [`SdkError::ConnectionError`] / [`SdkError::HttpError`] for transport failures
    /// - [`SdkError::BackendError`] when the backend reports `success: false`
    pub async fn analyze_correlation(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Vec<CorrelationResult>, SdkError> {
        request.validate().map_err(SdkError::InvalidRequest)?;

        let url = self.analyze_url();
        tracing::debug!(%url, mission_id = %request.mission_id, "Requesting correlation analysis");

        let response = self.http_client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SdkError::HttpError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let results = AnalyzeResponse::parse_results(&body)?;

        tracing::info!(
            mission_id = %request.mission_id,
            results = results.len(),
            "Correlation analysis received"
        );
        Ok(results)
    }
}
