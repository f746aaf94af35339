//! REST client for the notification endpoints.
//!
//! Wraps the backlog fetch and read-receipt calls using [`reqwest`].

use ums_core::topics;
use ums_core::types::DbId;

use crate::messages::OutcomeNotification;

/// HTTP client for the notification REST surface.
pub struct NotificationApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the notification REST layer.
#[derive(Debug, thiserror::Error)]
pub enum NotifyApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Notification API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl NotificationApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8081`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across API wrappers).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the persisted notification backlog for the current user.
    pub async fn fetch_outcome_notifications(
        &self,
    ) -> Result<Vec<OutcomeNotification>, NotifyApiError> {
        let response = self
            .client
            .get(format!(
                "{}{}",
                self.base_url,
                topics::API_OUTCOME_NOTIFICATIONS
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Mark one notification as read.
    ///
    /// No response body is expected; only the status code matters.
    pub async fn mark_read(&self, id: DbId) -> Result<(), NotifyApiError> {
        let response = self
            .client
            .post(format!(
                "{}{}",
                self.base_url,
                topics::api_notification_read(id)
            ))
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`NotifyApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, NotifyApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NotifyApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, NotifyApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), NotifyApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
