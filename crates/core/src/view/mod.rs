//! In-memory view models standing in for the DOM surface.
//!
//! The state of the page's `<table>` and `<select>` elements lives in
//! plain structs; the `render_html` methods produce the markup with
//! untrusted text escaped, so a hostile notification body can never
//! become live HTML.

pub mod escape;
pub mod notification_table;
pub mod select;

pub use escape::escape_html;
pub use notification_table::{NotificationRow, NotificationTable};
pub use select::{SelectControl, SelectOption};
