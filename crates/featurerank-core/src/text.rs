//! Text normalization shared by the embedder and the theme namers.

/// Suffix appended to truncated themes.
pub const ELLIPSIS: &str = "...";

/// Whether the text has no non-whitespace character.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Lowercase and collapse every whitespace run into a single space.
pub fn preprocess(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `text` to at most `max_chars` characters, appending [`ELLIPSIS`]
/// when anything was removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_lowercases_and_collapses() {
        assert_eq!(preprocess("  Dark\tMODE\n\nplease "), "dark mode please");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll...");
    }
}
