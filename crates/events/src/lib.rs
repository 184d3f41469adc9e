//! Motorpool event bus and notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the envelope every notification travels in.
//! - [`EventNotifier`]: the contract use cases call to announce an event,
//!   with [`BusNotifier`] and [`WebhookNotifier`] implementations.
//! - [`EventLog`]: background subscriber that traces every bus event.

pub mod bus;
pub mod delivery;
pub mod log;
pub mod notifier;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::webhook::WebhookNotifier;
pub use log::EventLog;
pub use notifier::{BusNotifier, DeliveryError, EventNotifier, EventSpec};
