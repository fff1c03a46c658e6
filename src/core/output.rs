//! Compact output rendering helpers for CLI surfaces.
//!
//! Keeps command result output bounded and readable while preserving signal.

/// Collapse internal whitespace and bound a message for single-line display.
pub fn clip(message: &str, max_chars: usize) -> String {
    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Render up to `max_items` messages as clipped bullet lines, with a trailing
/// overflow marker when more were collected.
pub fn bullet_lines(messages: &[String], max_items: usize, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = messages
        .iter()
        .take(max_items)
        .map(|m| format!("  - {}", clip(m, max_chars)))
        .collect();
    if messages.len() > max_items {
        lines.push(format!("  (+{} more)", messages.len() - max_items));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_collapses_whitespace() {
        assert_eq!(clip("a\n  b\tc", 80), "a b c");
    }

    #[test]
    fn test_clip_bounds_length() {
        let clipped = clip(&"x".repeat(100), 10);
        assert_eq!(clipped.chars().count(), 10);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn test_bullet_lines_overflow_marker() {
        let messages: Vec<String> = (0..5).map(|i| format!("message {i}")).collect();
        let lines = bullet_lines(&messages, 3, 40);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "  (+2 more)");
    }
}
