//! Client-level events emitted by the notification listener.
//!
//! Observers subscribe via
//! [`NotificationListener::subscribe_events`](crate::NotificationListener::subscribe_events)
//! and receive every state change the listener goes through.

use serde::Serialize;
use ums_core::types::DbId;

/// A state change in the notification client.
#[derive(Debug, Clone, Serialize)]
pub enum NotificationEvent {
    /// The STOMP session was established.
    Connected { session_id: String },

    /// The connection ended, either by request or because the broker
    /// closed it.
    Disconnected { session_id: String },

    /// A notification message arrived and was appended to the table.
    Received {
        destination: String,
        message: String,
    },

    /// A notification was acknowledged and its row removed.
    Acknowledged { notification_id: DbId },

    /// A transport or protocol failure was reported. The connection is
    /// not recovered automatically.
    ProtocolError { detail: String },
}
