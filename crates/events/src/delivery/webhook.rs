//! Webhook delivery with exponential-backoff retry.
//!
//! [`WebhookNotifier`] sends a JSON-encoded [`PlatformEvent`] to an external
//! URL via HTTP POST. Failed attempts are retried after each configured
//! delay (default 1 s, 2 s, 4 s), so the default makes four attempts.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::bus::PlatformEvent;
use crate::notifier::{DeliveryError, EventNotifier, EventSpec};

/// Default retry delays (exponential backoff: 1s, 2s, 4s).
const DEFAULT_RETRY_DELAYS: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(4),
];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers events to an external webhook endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    spec: EventSpec,
    retry_delays: Vec<Duration>,
}

impl WebhookNotifier {
    /// Create a notifier posting to `url` with a pre-configured HTTP client.
    pub fn new(url: impl Into<String>, spec: EventSpec) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            spec,
            retry_delays: DEFAULT_RETRY_DELAYS.to_vec(),
        })
    }

    /// Replace the backoff schedule. An empty schedule means a single attempt.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Deliver an event to the webhook URL with retry.
    ///
    /// Returns `Ok(())` on the first successful attempt, otherwise the error
    /// from the final attempt.
    pub async fn deliver(&self, event: &PlatformEvent) -> Result<(), DeliveryError> {
        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(event).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url = %self.url,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        // Final attempt after the last backoff.
        self.try_send(event).await.inspect_err(|e| {
            tracing::error!(url = %self.url, error = %e, "Webhook delivery failed after all retries");
        })
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, event: &PlatformEvent) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.url).json(event).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl<T> EventNotifier<T> for WebhookNotifier
where
    T: Serialize + Sync,
{
    async fn notify(&self, message: &T) -> Result<(), DeliveryError> {
        let event = self.spec.envelope(message)?;
        self.deliver(&event).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
