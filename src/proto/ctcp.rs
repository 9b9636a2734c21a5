//! CTCP framing for ACTION messages (`/me`).
//!
//! Other CTCP queries are delivered to modules as ordinary private or
//! channel messages, delimiters included.

const CTCP_DELIM: char = '\x01';

/// Extracts the action text from `\x01ACTION text\x01`.
///
/// The closing delimiter is optional, some clients omit it.
pub fn parse_action(text: &str) -> Option<&str> {
    let inner = text.strip_prefix(CTCP_DELIM)?;
    let inner = inner.strip_suffix(CTCP_DELIM).unwrap_or(inner);
    let (kind, params) = match inner.split_once(' ') {
        Some((kind, params)) => (kind, params),
        None => (inner, ""),
    };
    kind.eq_ignore_ascii_case("ACTION").then_some(params)
}

/// Wraps `text` as a CTCP ACTION payload.
pub fn action(text: &str) -> String {
    format!("{CTCP_DELIM}ACTION {text}{CTCP_DELIM}")
}
