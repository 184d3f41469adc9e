//! Structured-log subscriber for the event bus.
//!
//! [`EventLog`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! emits one `tracing` record per event. It runs as a long-lived background
//! task and shuts down when the bus sender is dropped.

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

/// Background service that traces every published event.
pub struct EventLog;

impl EventLog {
    /// Run the logging loop until the bus closes.
    ///
    /// Returns the number of events logged, which tests use to observe the
    /// loop without capturing log output.
    pub async fn run(mut receiver: broadcast::Receiver<PlatformEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        source_entity_type = event.source_entity_type.as_deref(),
                        source_entity_id = event.source_entity_id,
                        payload = %event.payload,
                        "Event published"
                    );
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event log lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event log shutting down");
                    break;
                }
            }
        }
        logged
    }
}
