//! View model for the notification table.
//!
//! Rows are appended in delivery order and never reordered. A row carries
//! the server-side notification id when one is known; only tagged rows can
//! be removed by an acknowledgement.

use crate::types::DbId;
use crate::view::escape::escape_html;

/// One rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    /// Server-side id, when the notification came from the backlog.
    /// Pushed messages have no id and cannot be acknowledged.
    pub id: Option<DbId>,
    /// Raw message text. Escaped at render time, stored verbatim.
    pub message: String,
}

/// Ordered collection of notification rows bound to one table element.
#[derive(Debug, Clone)]
pub struct NotificationTable {
    element_id: String,
    rows: Vec<NotificationRow>,
}

impl NotificationTable {
    /// Create an empty table bound to the given element id.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            rows: Vec::new(),
        }
    }

    /// Id of the `<table>` element this model renders into.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Append an untagged row.
    pub fn append(&mut self, message: impl Into<String>) {
        self.rows.push(NotificationRow {
            id: None,
            message: message.into(),
        });
    }

    /// Append a row tagged with a notification id.
    pub fn append_with_id(&mut self, id: DbId, message: impl Into<String>) {
        self.rows.push(NotificationRow {
            id: Some(id),
            message: message.into(),
        });
    }

    /// Remove every row tagged with `id`; untagged rows and rows with a
    /// different id are untouched. Returns the number of rows removed.
    pub fn remove(&mut self, id: DbId) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != Some(id));
        before - self.rows.len()
    }

    pub fn rows(&self) -> &[NotificationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table body as HTML rows.
    ///
    /// Tagged rows get a `data-id` attribute and an acknowledge button so
    /// the page can wire the click back to the client.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            match row.id {
                Some(id) => {
                    html.push_str(&format!(
                        "<tr data-id=\"{id}\"><td>{}</td>\
                         <td><button data-action=\"mark-read\" data-id=\"{id}\">Accetta</button></td></tr>",
                        escape_html(&row.message),
                    ));
                }
                None => {
                    html.push_str(&format!("<tr><td>{}</td></tr>", escape_html(&row.message)));
                }
            }
        }
        html
    }
}
