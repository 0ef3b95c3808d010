//! Note body rendering rules.
//!
//! # Responsibility
//! - Project raw note text into a markup-safe form with visual line breaks.
//!
//! # Invariants
//! - Every `\n` in the body becomes a visual line break; no other character
//!   is altered or reinterpreted.
//! - User content never injects markup: reserved characters are escaped
//!   before the line-break substitution.

/// Escapes markup-reserved characters in raw user text.
pub fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders a note body as escaped markup with `<br>` line breaks.
///
/// The substitution is global: every embedded line break becomes a visual
/// one, not just the first.
pub fn body_markup(raw: &str) -> String {
    escape_markup(raw).replace('\n', "<br>")
}

/// Splits a note body into visual lines for plain-text presenters.
pub fn body_lines(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}
