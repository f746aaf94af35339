//! Real-time outcome notification client.
//!
//! Connects to the university management broker over STOMP/WebSocket,
//! subscribes to the exam outcome topics, and maintains the notification
//! table view model:
//!
//! - [`NotificationListener`] -- connection lifecycle, subscriptions,
//!   backlog loading, acknowledgement, and the frame-processing loop.
//! - [`NotificationApi`] -- REST calls for the persisted backlog and
//!   read receipts.
//! - [`NotificationEvent`] -- broadcast events for observers (UI glue,
//!   logging, tests).
//! - [`reconnect`] -- opt-in exponential backoff. Nothing reconnects
//!   unless the caller asks; a dropped connection is reported and left
//!   dropped.

pub mod api;
pub mod events;
pub mod listener;
pub mod messages;
pub mod reconnect;

pub use api::{NotificationApi, NotifyApiError};
pub use events::NotificationEvent;
pub use listener::NotificationListener;
pub use messages::{BroadcastPayload, OutcomeMessage, OutcomeNotification};
pub use reconnect::ReconnectConfig;
