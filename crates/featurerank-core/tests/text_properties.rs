use proptest::prelude::*;

use featurerank_core::text::{is_blank, preprocess, truncate_chars, ELLIPSIS};

proptest! {
    #[test]
    fn preprocess_is_idempotent(text in "[a-zA-Z0-9 \\tÀ-ÿ]{0,80}") {
        let once = preprocess(&text);
        prop_assert_eq!(preprocess(&once), once);
    }

    #[test]
    fn preprocess_never_has_edge_or_double_spaces(text in "[a-zA-Z \\t\\n]{0,60}") {
        let cleaned = preprocess(&text);
        prop_assert!(!cleaned.starts_with(' '));
        prop_assert!(!cleaned.ends_with(' '));
        prop_assert!(!cleaned.contains("  "));
        prop_assert_eq!(is_blank(&text), cleaned.is_empty());
    }

    #[test]
    fn truncation_bounds_length(text in "\\PC{0,200}", max in 1usize..120) {
        let cut = truncate_chars(&text, max);
        let count = text.chars().count();
        if count <= max {
            prop_assert_eq!(cut, text);
        } else {
            prop_assert_eq!(cut.chars().count(), max + ELLIPSIS.len());
            prop_assert!(cut.ends_with(ELLIPSIS));
        }
    }
}
