//! Notifier wiring for vehicle events.
//!
//! Picks the delivery channel at startup: the webhook when
//! `NOTIFY_WEBHOOK_URL` is configured, otherwise the in-process event bus.

use std::sync::Arc;

use motorpool_core::vehicle::VehicleDto;
use motorpool_events::{
    BusNotifier, DeliveryError, EventBus, EventNotifier, EventSpec, WebhookNotifier,
};

use crate::config::ServerConfig;

/// Event type emitted once per stored vehicle.
pub const VEHICLE_CREATED: &str = "vehicle.created";

/// Envelope settings for vehicle-created events.
pub fn vehicle_created_spec() -> EventSpec {
    EventSpec::new(VEHICLE_CREATED).with_source_type("vehicle")
}

/// Build the notifier handed to the vehicle use cases.
pub fn build_vehicle_notifier(
    config: &ServerConfig,
    bus: &Arc<EventBus>,
) -> Result<Arc<dyn EventNotifier<VehicleDto>>, DeliveryError> {
    match &config.notify_webhook_url {
        Some(url) => {
            tracing::info!(%url, "Vehicle events delivered by webhook");
            Ok(Arc::new(WebhookNotifier::new(
                url.clone(),
                vehicle_created_spec(),
            )?))
        }
        None => {
            tracing::info!("Vehicle events published on the in-process bus");
            Ok(Arc::new(BusNotifier::new(
                Arc::clone(bus),
                vehicle_created_spec(),
            )))
        }
    }
}
