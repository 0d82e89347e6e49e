use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9.\-+_]+@[a-zA-Z0-9.\-+_]+\.[a-zA-Z]+").expect("valid email regex")
});

// Loose on purpose: accepts most digit runs with separators, so dates and
// IDs can show up here too.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3})?[\s\-\(]*\d{2,4}[\s\-\)]*\d{3,4}[\s\-]*\d{3,4}")
        .expect("valid phone regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Scans the whole text for email- and phone-shaped substrings.
/// Both lists keep first-seen order and contain no duplicates.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let emails = dedup_in_order(EMAIL_RE.find_iter(text).map(|m| m.as_str().to_string()));
    let phones = dedup_in_order(
        PHONE_RE
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string()),
    );
    ContactInfo { emails, phones }
}

/// Keeps the first occurrence of every item, preserving order.
pub(crate) fn dedup_in_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_phone_from_contact_line() {
        let info = extract_contact_info("Contact: jane@example.com, phone 555-123-4567");
        assert_eq!(info.emails, vec!["jane@example.com"]);
        assert!(info.phones.contains(&"555-123-4567".to_string()));
    }

    #[test]
    fn test_duplicates_removed_keeping_first_seen_order() {
        let text = "b@x.io a@x.io b@x.io\n+1 (555) 222-3333\n+1 (555) 222-3333\n";
        let info = extract_contact_info(text);
        assert_eq!(info.emails, vec!["b@x.io", "a@x.io"]);
        let unique: HashSet<_> = info.phones.iter().collect();
        assert_eq!(unique.len(), info.phones.len());
    }

    #[test]
    fn test_email_stops_at_trailing_punctuation() {
        let info = extract_contact_info("Reach me at first.last+cv@mail.co.uk.");
        assert_eq!(info.emails, vec!["first.last+cv@mail.co.uk"]);
    }

    #[test]
    fn test_phone_matches_are_trimmed() {
        let info = extract_contact_info("Phone:   98765 43210 ");
        assert!(!info.phones.is_empty());
        for phone in &info.phones {
            assert_eq!(phone, phone.trim());
        }
    }

    #[test]
    fn test_no_contacts_in_plain_prose() {
        let info = extract_contact_info("Seasoned engineer with a passion for tooling.");
        assert!(info.emails.is_empty());
        assert!(info.phones.is_empty());
    }

    #[test]
    fn test_dedup_in_order() {
        let out = dedup_in_order(["a", "b", "a", "c", "b"].map(String::from));
        assert_eq!(out, vec!["a", "b", "c"]);
    }
}
