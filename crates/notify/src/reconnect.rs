//! Exponential-backoff reconnection for the broker session.
//!
//! Nothing in this crate reconnects on its own: a dropped connection is
//! reported and stays dropped. Callers that want resilience pass a
//! [`ReconnectConfig`] and a [`CancellationToken`] to
//! [`NotificationListener::reconnect`](crate::NotificationListener::reconnect),
//! which drives [`reconnect_loop`] until a connection is restored or the
//! token fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use ums_stomp::{StompClient, StompConnection};

/// Backoff parameters for the reconnect loop.
pub struct ReconnectConfig {
    /// Delay before the first attempt.
    pub initial_delay: Duration,
    /// Ceiling the growing delay saturates at.
    pub max_delay: Duration,
    /// Growth factor applied after each failed attempt.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Delay to wait after `current`, saturating at the configured ceiling.
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    current.mul_f64(config.multiplier).min(config.max_delay)
}

/// Attempt to reconnect to the broker with exponential backoff.
///
/// Returns `Some(connection)` once a connection succeeds, or `None` if
/// the `cancel` token is triggered before a successful connection.
pub async fn reconnect_loop(
    client: &StompClient,
    config: &ReconnectConfig,
    cancel: &CancellationToken,
) -> Option<StompConnection> {
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        tracing::info!(
            url = %client.ws_url(),
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting to broker",
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(url = %client.ws_url(), "Reconnect cancelled");
                return None;
            }
            result = client.connect() => {
                match result {
                    Ok(conn) => {
                        tracing::info!(url = %client.ws_url(), attempt, "Reconnected to broker");
                        return Some(conn);
                    }
                    Err(e) => {
                        tracing::warn!(
                            url = %client.ws_url(),
                            error = %e,
                            "Reconnect attempt {attempt} failed",
                        );
                    }
                }
            }
        }

        // Wait before the next attempt, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }

        delay = next_delay(delay, config);
    }
}
