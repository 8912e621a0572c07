//! Pushover notification channel
//!
//! Routes notification requests to destination keys, builds the wire
//! message, fans it out through a [`PushTransport`], and cancels emergency
//! notifications by receipt.

mod cancel;
mod dispatcher;
mod keys;
mod message;
mod transport;

pub use cancel::CancellationClient;
pub use dispatcher::{DeliveryOutcome, DispatchOutcome, Dispatcher, PendingDelivery};
pub use keys::KeyRouter;
pub use message::{effective_retry_minutes, ChannelMessage, MessageBuilder};
pub use transport::{http_client, PushTransport, PushoverClient, SendReceipt};

use crate::config::Config;
use crate::domain::Receipt;
use crate::error::{ConfigError, Result};
use std::sync::Arc;

/// A configured Pushover channel
pub struct Pushover {
    dispatcher: Dispatcher,
    canceller: CancellationClient,
}

impl Pushover {
    /// Build the channel from configuration using the HTTP transport
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client()?;
        let api_token = required_token(config)?;
        let transport = Arc::new(PushoverClient::new(
            client.clone(),
            &config.pushover.api_url,
            api_token,
        ));

        Self::with_client(config, transport, client)
    }

    /// Build the channel with a custom transport
    pub fn with_transport(config: &Config, transport: Arc<dyn PushTransport>) -> Result<Self> {
        Self::with_client(config, transport, http_client()?)
    }

    fn with_client(
        config: &Config,
        transport: Arc<dyn PushTransport>,
        client: reqwest::Client,
    ) -> Result<Self> {
        let api_token = required_token(config)?;

        let router = KeyRouter::from_config(&config.pushover);
        if router.is_empty() {
            return Err(ConfigError::NoDestinationKeys.into());
        }

        let builder = MessageBuilder::new(config.settings.base_url.as_deref());
        let canceller = CancellationClient::new(client, &config.pushover.api_url, api_token);

        Ok(Self {
            dispatcher: Dispatcher::new(router, builder, transport),
            canceller,
        })
    }

    /// Build the channel, logging once whether it is available
    pub fn setup(config: &Config) -> Option<Self> {
        match Self::from_config(config) {
            Ok(pushover) => {
                log::info!("Pushover is ready to push");
                Some(pushover)
            }
            Err(e) => {
                log::info!("Pushover was NOT configured: {}", e);
                None
            }
        }
    }

    /// The dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Cancel an emergency notification
    pub async fn cancel(&self, receipt: &Receipt) -> std::result::Result<reqwest::StatusCode, reqwest::Error> {
        self.canceller.cancel(receipt).await
    }
}

pub(crate) fn required_token(config: &Config) -> std::result::Result<&str, ConfigError> {
    config
        .pushover
        .api_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ConfigError::MissingField("pushover.api_token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeySetting;
    use crate::error::AppError;
    use crate::mock::MockTransport;

    fn configured() -> Config {
        let mut config = Config::default();
        config.pushover.api_token = Some("tok".to_string());
        config.pushover.user_key = KeySetting::parse("U1");
        config
    }

    #[test]
    fn test_missing_token_is_not_configured() {
        let mut config = configured();
        config.pushover.api_token = None;

        let result = Pushover::with_transport(&config, Arc::new(MockTransport::new()));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_no_keys_is_not_configured() {
        let mut config = configured();
        config.pushover.user_key = KeySetting::Unset;

        let result = Pushover::with_transport(&config, Arc::new(MockTransport::new()));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::NoDestinationKeys))
        ));
        assert!(Pushover::setup(&config).is_none());
    }

    #[test]
    fn test_setup_with_keys() {
        let pushover = Pushover::setup(&configured()).unwrap();
        assert!(!pushover.dispatcher().router().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_through_channel() {
        let transport = Arc::new(MockTransport::new());
        let pushover = Pushover::with_transport(&configured(), transport.clone()).unwrap();

        let request = crate::domain::NotificationRequest::new(
            crate::domain::SeverityLevel::Info,
            "Warning, HIGH: 200",
            "BG Now: 200",
        );
        let outcomes = pushover
            .dispatcher()
            .dispatch(&request)
            .unwrap()
            .settle()
            .await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(transport.sent()[0].user, "U1");
    }
}
