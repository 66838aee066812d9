use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    // word@word.word, nothing more
    static ref EMAIL_REGEX: Regex = Regex::new(r"\w+@\w+\.\w+").unwrap();
}

/// Extracts email-shaped substrings from raw page text
///
/// Matches `local@domain.tld` where each part is a run of word characters.
/// There is no further validation, so dotted local parts and multi-label
/// domains are cut down to the part that fits the shape.
///
/// # Examples
///
/// ```
/// use domain_harvester::extract_emails;
///
/// let emails = extract_emails("contact admin@example.com today");
/// assert!(emails.contains("admin@example.com"));
/// ```
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_email() {
        assert_eq!(
            extract_emails("contact admin@example.com today"),
            BTreeSet::from(["admin@example.com".to_string()])
        );
    }

    #[test]
    fn test_multiple_and_duplicate_emails() {
        let found = extract_emails(
            "<a href=\"mailto:info@bowdoin.edu\">info@bowdoin.edu</a> or jobs@bowdoin.edu",
        );
        assert_eq!(
            found,
            BTreeSet::from(["info@bowdoin.edu".to_string(), "jobs@bowdoin.edu".to_string()])
        );
    }

    #[test]
    fn test_shape_only_match() {
        // dotted parts are truncated to what fits word@word.word
        let found = extract_emails("first.last@mail.example.com");
        assert_eq!(found, BTreeSet::from(["last@mail.example".to_string()]));
    }

    #[test]
    fn test_underscores_and_digits() {
        let found = extract_emails("reach a_b2@host_1.io");
        assert!(found.contains("a_b2@host_1.io"));
    }

    #[test]
    fn test_no_emails() {
        assert!(extract_emails("no at sign here, just @ and .").is_empty());
        assert!(extract_emails("").is_empty());
        assert!(extract_emails("user@localhost").is_empty());
    }
}
