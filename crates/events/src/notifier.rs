//! The notification contract used by the use-case layer.
//!
//! [`EventNotifier`] is parameterized over the payload type so callers keep
//! their concrete DTOs; implementations serialize the payload into a
//! [`PlatformEvent`] envelope at the edge.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::bus::{EventBus, PlatformEvent};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The payload could not be encoded as JSON.
    #[error("Failed to encode event payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote endpoint returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Publishes a message of type `T` to subscribers outside the use case.
#[async_trait]
pub trait EventNotifier<T: Sync>: Send + Sync {
    async fn notify(&self, message: &T) -> Result<(), DeliveryError>;
}

/// Which event a notifier emits and how the envelope is labelled.
#[derive(Debug, Clone)]
pub struct EventSpec {
    pub event_type: String,
    /// Entity kind recorded as the event source. When set, a numeric `id`
    /// field at the top level of the payload becomes the source id.
    pub source_entity_type: Option<String>,
}

impl EventSpec {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
        }
    }

    pub fn with_source_type(mut self, entity_type: impl Into<String>) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self
    }

    /// Wrap `message` into a [`PlatformEvent`].
    pub fn envelope<T: Serialize>(&self, message: &T) -> Result<PlatformEvent, DeliveryError> {
        let payload = serde_json::to_value(message)?;
        let source_id = payload.get("id").and_then(serde_json::Value::as_i64);

        let mut event = PlatformEvent::new(self.event_type.clone());
        if let (Some(entity_type), Some(id)) = (&self.source_entity_type, source_id) {
            event = event.with_source(entity_type.clone(), id);
        }
        Ok(event.with_payload(payload))
    }
}

// ---------------------------------------------------------------------------
// BusNotifier
// ---------------------------------------------------------------------------

/// Notifier that publishes onto the in-process [`EventBus`].
///
/// Publishing never fails once the payload is encoded; an event with no
/// subscribers is dropped.
pub struct BusNotifier {
    bus: Arc<EventBus>,
    spec: EventSpec,
}

impl BusNotifier {
    pub fn new(bus: Arc<EventBus>, spec: EventSpec) -> Self {
        Self { bus, spec }
    }
}

#[async_trait]
impl<T> EventNotifier<T> for BusNotifier
where
    T: Serialize + Sync,
{
    async fn notify(&self, message: &T) -> Result<(), DeliveryError> {
        let event = self.spec.envelope(message)?;
        let event_type = event.event_type.clone();
        let receivers = self.bus.publish(event);
        if receivers == 0 {
            tracing::debug!(%event_type, "Event published with no subscribers");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
