use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    // (NPA) NXX-XXXX, NPA-NXX-XXXX, NPA.NXX.XXXX, NPA NXX XXXX and mixes.
    // Groups: 1 = parenthesized area code, 2 = bare area code, 3 = exchange, 4 = line.
    static ref PHONE_REGEX: Regex = Regex::new(
        r"(?:\(([0-9]{3})\)\s?[.-]?\s?|\b([0-9]{3})(?:\s?[.-]\s?|\s))([2-9][0-9]{2})(?:\s?[.-]\s?|\s)([0-9]{4})\b"
    )
    .unwrap();
}

/// Extracts North-American phone numbers from raw page text
///
/// A number is a 3-digit area code (optionally in parentheses), a 3-digit
/// exchange starting with 2-9, and a 4-digit line number, separated by
/// whitespace, a hyphen or a dot. Every match is returned in `NPA-NXX-XXXX` form.
///
/// # Examples
///
/// ```
/// use domain_harvester::extract_phones;
///
/// let phones = extract_phones("Call (207) 725.3000 or 207 725 3000");
/// assert_eq!(phones.len(), 1);
/// assert!(phones.contains("207-725-3000"));
/// ```
pub fn extract_phones(text: &str) -> BTreeSet<String> {
    PHONE_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let area = caps.get(1).or_else(|| caps.get(2))?;
            Some(format!(
                "{}-{}-{}",
                area.as_str(),
                caps.get(3)?.as_str(),
                caps.get(4)?.as_str()
            ))
        })
        .collect()
}
