/// Collapse every whitespace run (including newlines) to a single space
/// and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Neutralize spreadsheet formula injection: a value starting with `=`
/// gets a leading apostrophe. Anything else passes through untouched.
///
/// Call once per value. Re-escaping an escaped value is a no-op, since it
/// no longer starts with `=`.
pub fn escape_formula(s: &str) -> Option<String> {
    if s.starts_with('=') {
        Some(format!("'{s}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_mixed_whitespace() {
        assert_eq!(
            collapse_whitespace("  Drilled\n ahead \t to   5,200 ft \r\n"),
            "Drilled ahead to 5,200 ft"
        );
    }

    #[test]
    fn test_collapse_empty() {
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_escape_leading_equals() {
        assert_eq!(escape_formula("=SUM(A1:A9)").as_deref(), Some("'=SUM(A1:A9)"));
    }

    #[test]
    fn test_escape_ignores_inner_equals() {
        assert_eq!(escape_formula("WOB = 25"), None);
        assert_eq!(escape_formula(""), None);
    }

    #[test]
    fn test_escape_is_stable_on_escaped_value() {
        let once = escape_formula("=1+1").unwrap();
        assert_eq!(escape_formula(&once), None);
    }
}
