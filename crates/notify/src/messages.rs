//! Wire payloads exchanged with the notification endpoints.

use serde::{Deserialize, Serialize};
use ums_core::types::{DbId, LocalTimestamp};

/// One persisted notification from the backlog endpoint.
///
/// The server serialises the full DTO, but only `message` is guaranteed;
/// pushed messages and older payload shapes omit the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeNotification {
    #[serde(default)]
    pub id: Option<DbId>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<LocalTimestamp>,
    #[serde(default)]
    pub expires_at: Option<LocalTimestamp>,
}

/// Body of a broadcast message on the global notify topic.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastPayload {
    pub content: String,
}

/// Body published to the application notify destination.
#[derive(Debug, Serialize)]
pub struct OutcomeMessage<'a> {
    pub message: &'a str,
}
