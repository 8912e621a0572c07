//! Emergency notification cancellation

use super::transport::http_client;
use crate::config::Config;
use crate::domain::Receipt;

/// Cancels emergency notifications by receipt
///
/// Best-effort: no retry, and cancelling an already acknowledged or expired
/// notification is not detected here.
pub struct CancellationClient {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

impl CancellationClient {
    /// Create a client for the given API root and application token
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Create a client from configuration
    ///
    /// Only the API token is required; destination keys are not consulted.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let api_token = super::required_token(config)?;
        Ok(Self::new(http_client()?, &config.pushover.api_url, api_token))
    }

    /// Build the cancel request for a receipt
    pub fn request(&self, receipt: &Receipt) -> Result<reqwest::Request, reqwest::Error> {
        let url = format!(
            "{}/receipts/{}/cancel.json",
            self.api_url.trim_end_matches('/'),
            receipt
        );

        self.client
            .get(url)
            .query(&[("token", self.api_token.as_str())])
            .build()
    }

    /// Cancel the notification behind `receipt`
    ///
    /// Any HTTP response counts as success and its status is returned.
    /// Transport-level errors are passed through unchanged.
    pub async fn cancel(&self, receipt: &Receipt) -> Result<reqwest::StatusCode, reqwest::Error> {
        let request = self.request(receipt)?;
        let response = self.client.execute(request).await?;

        log::info!(
            "cancel request for receipt {} answered with {}",
            receipt,
            response.status()
        );

        Ok(response.status())
    }
}
