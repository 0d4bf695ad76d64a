/// Maximum number of visible characters kept from any free-text summary.
pub const SUMMARY_LEN: usize = 32;

/// Appended to text that has been cut short.
pub const ELLIPSIS: &str = "...";

/// Bounds `text` to `max_visible` characters, preferring to cut at the last
/// whitespace seen before the limit.
///
/// A line break always ends the text early, even before the limit is reached.
/// Text that is already truncated (a body within the limit followed by the
/// ellipsis) is returned as is, so applying this twice changes nothing.
pub fn truncate(text: &str, max_visible: usize) -> String {
    if let Some(body) = text.strip_suffix(ELLIPSIS) {
        if !body.contains(is_line_break) && body.chars().count() <= max_visible {
            return text.to_string();
        }
    }

    let mut boundary = None;
    for (count, (ix, ch)) in text.char_indices().enumerate() {
        if is_line_break(ch) {
            return format!("{}{ELLIPSIS}", &text[..ix]);
        }

        if ch.is_whitespace() {
            boundary = Some(ix);
        }

        // `ix` is the byte offset of character number `max_visible`, so the
        // fallback cut keeps exactly `max_visible` characters.
        if count >= max_visible {
            return format!("{}{ELLIPSIS}", &text[..boundary.unwrap_or(ix)]);
        }
    }

    text.to_string()
}

fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}
