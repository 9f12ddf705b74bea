//! Input parsing helpers for presentation layers.
//!
//! The core never reads user input itself. Callers collecting comma-separated lists from a
//! console or form use these helpers so that every surface splits input the same way.

/// Splits comma-separated text into trimmed, non-empty entries.
///
/// Blank input yields an empty list. An empty list means "keep current value" to
/// [`Registry::update`](crate::registry::Registry::update) and is rejected by symptom search.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Returns `None` for blank text, otherwise the trimmed text.
///
/// Used to turn an optional free-text field into "no change" when the user left it blank.
pub fn non_blank(input: Option<String>) -> Option<String> {
    input
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_list(" fever ,cough,  sore throat,, "),
            vec!["fever", "cough", "sore throat"]
        );
    }

    #[test]
    fn parse_list_of_blank_input_is_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("  ,  ").is_empty());
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" Flu ".into())), Some("Flu".to_string()));
    }
}
