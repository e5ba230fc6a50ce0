//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Single-line preview of a multi-line response body.
///
/// Collapses all runs of whitespace (including newlines) into single
/// spaces before truncating, so the preview fits on one terminal line.
pub fn preview(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("council", 10), "council");
        assert_eq!(truncate("council debate", 10), "council...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes: "débat" = 6 bytes
        assert_eq!(truncate("débat", 6), "débat");
        // max_len=5 -> target=2 -> 'é' spans bytes 1..3 -> back to 1
        assert_eq!(truncate("débat", 5), "d...");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        let body = "## Summary\n\nRust   offers\tmemory safety.";
        assert_eq!(preview(body, 80), "## Summary Rust offers memory safety.");
        assert_eq!(preview(body, 13), "## Summary...");
    }
}
