//! Push transport
//!
//! [`PushTransport`] is the seam between the dispatcher and the network.
//! [`PushoverClient`] delivers messages through the Pushover HTTP API.

use super::message::ChannelMessage;
use crate::domain::Receipt;
use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP request timeout for a single delivery attempt
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Request identifier assigned by the service
    pub request: String,
    /// Receipt for emergency-priority messages
    pub receipt: Option<Receipt>,
}

/// Delivers one addressed message
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Transport name for logging
    fn name(&self) -> &str;

    /// Send a message to the key in `message.user`
    async fn send(&self, message: &ChannelMessage) -> Result<SendReceipt, TransportError>;
}

/// Build the HTTP client shared by sends and cancellations
pub fn http_client() -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| TransportError::Client(e.to_string()))
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    token: &'a str,
    #[serde(flatten)]
    message: &'a ChannelMessage,
}

#[derive(Deserialize)]
struct ApiResponse {
    status: i64,
    #[serde(default)]
    request: String,
    #[serde(default)]
    receipt: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Pushover API transport
pub struct PushoverClient {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

impl PushoverClient {
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

    fn messages_url(&self) -> String {
        format!("{}/messages.json", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PushTransport for PushoverClient {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn send(&self, message: &ChannelMessage) -> Result<SendReceipt, TransportError> {
        let payload = MessagePayload {
            token: &self.api_token,
            message,
        };

        let response = self
            .client
            .post(self.messages_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: ApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(TransportError::Rejected {
                    status: status.as_u16(),
                    errors: "unreadable response body".to_string(),
                })
            }
        };

        if !status.is_success() || body.status != 1 {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                errors: body.errors.join("; "),
            });
        }

        let receipt = body.receipt.and_then(|r| match Receipt::new(r) {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                log::warn!("ignoring receipt from pushover: {}", e);
                None
            }
        });

        Ok(SendReceipt {
            request: body.request,
            receipt,
        })
    }
}
