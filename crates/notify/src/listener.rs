//! Notification listener: one STOMP session feeding one table model.
//!
//! The listener owns the broker connection, the REST client, and the
//! [`NotificationTable`]. Incoming `MESSAGE` frames are appended in
//! delivery order; acknowledgement removes a row only after the read
//! receipt succeeds server-side.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use ums_core::topics;
use ums_core::types::DbId;
use ums_core::view::NotificationTable;
use ums_stomp::frame::{Command, Frame};
use ums_stomp::{StompClient, StompConnection, StompError};

use crate::api::{NotificationApi, NotifyApiError};
use crate::events::NotificationEvent;
use crate::messages::{BroadcastPayload, OutcomeMessage};
use crate::reconnect::{reconnect_loop, ReconnectConfig};

/// Broadcast channel capacity for client events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Element id of the notification table in the page templates.
const NOTIFY_TABLE_ID: &str = "notify";

/// Real-time notification client bound to one user session.
pub struct NotificationListener {
    client: StompClient,
    conn: StompConnection,
    api: NotificationApi,
    table: NotificationTable,
    event_tx: broadcast::Sender<NotificationEvent>,
}

impl NotificationListener {
    /// Connect to the broker and build an empty notification view.
    ///
    /// * `broker_ws_url` - full WebSocket URL of the STOMP endpoint,
    ///   e.g. `ws://localhost:8081/ws`.
    /// * `api`           - REST client for backlog and read receipts.
    pub async fn connect(
        broker_ws_url: &str,
        api: NotificationApi,
    ) -> Result<Self, StompError> {
        let client = StompClient::new(broker_ws_url);
        let conn = client.connect().await?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let listener = Self {
            client,
            conn,
            api,
            table: NotificationTable::new(NOTIFY_TABLE_ID),
            event_tx,
        };
        listener.emit(NotificationEvent::Connected {
            session_id: listener.conn.session_id().to_string(),
        });
        Ok(listener)
    }

    /// Subscribe to client events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<NotificationEvent> {
        self.event_tx.subscribe()
    }

    /// Current notification view.
    pub fn table(&self) -> &NotificationTable {
        &self.table
    }

    /// Subscribe to the user-scoped exam outcome topic.
    pub async fn subscribe_exam_outcomes(&mut self) -> Result<String, StompError> {
        self.conn.subscribe(topics::TOPIC_EXAM_OUTCOME).await
    }

    /// Subscribe to the global broadcast topic.
    pub async fn subscribe_broadcast(&mut self) -> Result<String, StompError> {
        self.conn.subscribe(topics::TOPIC_NOTIFY).await
    }

    /// Fetch the persisted backlog once and append every entry.
    ///
    /// Entries carrying an id become acknowledgeable rows; the rest
    /// render as plain rows. Returns the number of rows appended.
    pub async fn load_backlog(&mut self) -> Result<usize, NotifyApiError> {
        let notifications = self.api.fetch_outcome_notifications().await?;
        let count = notifications.len();
        for notification in notifications {
            match notification.id {
                Some(id) => self.table.append_with_id(id, notification.message),
                None => self.table.append(notification.message),
            }
        }
        tracing::info!(count, "Loaded notification backlog");
        Ok(count)
    }

    /// Acknowledge one notification.
    ///
    /// The row is removed only after the read receipt succeeds; a failed
    /// request leaves the table untouched.
    pub async fn acknowledge(&mut self, id: DbId) -> Result<(), NotifyApiError> {
        self.api.mark_read(id).await?;
        let removed = self.table.remove(id);
        tracing::info!(notification_id = id, removed, "Notification acknowledged");
        self.emit(NotificationEvent::Acknowledged {
            notification_id: id,
        });
        Ok(())
    }

    /// Publish a message to the application notify destination.
    pub async fn publish(&mut self, message: &str) -> Result<(), StompError> {
        let body = serde_json::to_string(&OutcomeMessage { message })
            .expect("OutcomeMessage is always serialisable");
        self.conn
            .send(topics::DEST_NOTIFY, "application/json", body)
            .await
    }

    /// Process incoming frames until the connection ends or `cancel`
    /// is triggered.
    ///
    /// Malformed frames are logged and skipped; a transport failure ends
    /// the loop. Either way the connection is not re-established here;
    /// see [`NotificationListener::reconnect`] for the opt-in policy.
    pub async fn run(&mut self, cancel: &CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(session_id = %self.conn.session_id(), "Listener cancelled");
                    return;
                }
                frame = self.conn.next_frame() => match frame {
                    Some(Ok(frame)) => self.handle_frame(frame),
                    Some(Err(StompError::Protocol(detail))) => {
                        tracing::warn!(error = %detail, "Skipping malformed frame");
                        self.emit(NotificationEvent::ProtocolError { detail });
                    }
                    Some(Err(e)) => {
                        let detail = e.to_string();
                        tracing::error!(error = %detail, "WebSocket receive error");
                        self.emit(NotificationEvent::ProtocolError { detail });
                        self.emit_disconnected();
                        return;
                    }
                    None => {
                        self.emit_disconnected();
                        return;
                    }
                }
            }
        }
    }

    /// Re-establish the connection with exponential backoff.
    ///
    /// This is the explicit resilience opt-in: nothing calls it
    /// automatically. Returns `true` once a new session is live (the
    /// caller must re-subscribe), or `false` if `cancel` fired first.
    pub async fn reconnect(
        &mut self,
        config: &ReconnectConfig,
        cancel: &CancellationToken,
    ) -> bool {
        match reconnect_loop(&self.client, config, cancel).await {
            Some(conn) => {
                self.conn = conn;
                self.emit(NotificationEvent::Connected {
                    session_id: self.conn.session_id().to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Disconnect from the broker, consuming the listener.
    pub async fn disconnect(self) -> Result<(), StompError> {
        self.emit_disconnected();
        self.conn.disconnect().await
    }

    // ---- private helpers ----

    /// Dispatch one parsed frame.
    fn handle_frame(&mut self, frame: Frame) {
        match frame.command {
            Command::Message => self.handle_message(frame),
            Command::Error => {
                let detail = frame
                    .header("message")
                    .unwrap_or(&frame.body)
                    .to_string();
                tracing::error!(error = %detail, "Broker reported error");
                self.emit(NotificationEvent::ProtocolError { detail });
            }
            Command::Receipt => {
                tracing::debug!(
                    receipt_id = frame.header("receipt-id").unwrap_or("?"),
                    "Receipt from broker",
                );
            }
            other => {
                tracing::debug!(command = other.as_str(), "Ignoring frame");
            }
        }
    }

    /// Append a `MESSAGE` frame to the table.
    ///
    /// The user topic carries plain text; the broadcast topic wraps the
    /// text in a JSON `{"content": …}` object.
    fn handle_message(&mut self, frame: Frame) {
        let destination = frame.header("destination").unwrap_or("").to_string();

        let message = if destination == topics::TOPIC_NOTIFY {
            match serde_json::from_str::<BroadcastPayload>(&frame.body) {
                Ok(payload) => payload.content,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        raw_message = %frame.body,
                        "Failed to parse broadcast payload",
                    );
                    return;
                }
            }
        } else {
            frame.body
        };

        tracing::debug!(destination = %destination, "Notification received");
        self.table.append(message.clone());
        self.emit(NotificationEvent::Received {
            destination,
            message,
        });
    }

    fn emit_disconnected(&self) {
        self.emit(NotificationEvent::Disconnected {
            session_id: self.conn.session_id().to_string(),
        });
    }

    fn emit(&self, event: NotificationEvent) {
        // Ignore the SendError; it only means there are zero observers.
        let _ = self.event_tx.send(event);
    }
}
