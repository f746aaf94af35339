//! Minimal HTML text escaping.

/// Escape a string for interpolation into HTML text or attribute values.
///
/// Covers the five characters that can change parsing context. Message
/// bodies arrive from the server unescaped, so every interpolation point
/// in the view models goes through here.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
