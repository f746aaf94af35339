//! Well-known STOMP destinations and REST paths.
//!
//! These must match the broker configuration and controller mappings on the
//! university management server. Any change on the server side is a breaking
//! change for every client built on this crate.

use crate::types::DbId;

/// Path of the STOMP-over-WebSocket endpoint, relative to the broker URL.
pub const STOMP_ENDPOINT: &str = "/ws";

/// User-scoped topic carrying exam outcome notifications as plain text.
///
/// The server resolves the `/user` prefix per session, so every client
/// subscribes to the same literal destination.
pub const TOPIC_EXAM_OUTCOME: &str = "/user/topic/exam-outcome";

/// Global broadcast topic. Bodies are JSON objects with a `content` field.
pub const TOPIC_NOTIFY: &str = "/topic/notify";

/// Application destination for submitting a notification message.
pub const DEST_NOTIFY: &str = "/app/notify";

/// Backlog of persisted outcome notifications for the current user.
pub const API_OUTCOME_NOTIFICATIONS: &str = "/api/v1/outcome-notifications";

/// Flat list of degree courses for select population.
pub const API_DEGREE_COURSES: &str = "/api/v1/read/degree-course/ajax";

/// Courses belonging to one degree course; takes a `name` query parameter
/// and requires a bearer token.
pub const API_DEGREE_COURSE_COURSES: &str = "/api/v1/degree-course/courses/ajax";

/// Examination appeals published by the current professor.
pub const API_EXAMINATION_APPEALS: &str = "/api/v1/examination-appeal/view/professor";

/// Path for acknowledging a single notification.
pub fn api_notification_read(id: DbId) -> String {
    format!("/api/v1/notifications/{id}/read")
}
