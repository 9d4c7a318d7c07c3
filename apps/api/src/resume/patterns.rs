//! Contact detection for the resume preamble.
//!
//! Patterns are deliberately narrow: a skills line such as "C++, Python 3.11" must
//! never be mistaken for a phone number or email.

use std::sync::LazyLock;

use regex::Regex;

/// Token with an `@` and a dotted domain.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").expect("email pattern is valid")
});

/// Candidate phone run: optional `+`, digits with hyphen/space/paren separators.
/// Digit count and token boundaries are checked separately.
static PHONE_CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?[0-9(][0-9\-\s()]*[0-9]").expect("phone pattern is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("url pattern is valid")
});

static CONTACT_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:email|phone|linkedin|github)\b").expect("contact word pattern is valid")
});

const MIN_PHONE_DIGITS: usize = 9;

/// Digit groups that read as years; two of them in one run make it a date range.
const MAX_YEAR_GROUPS: usize = 1;

pub fn has_email(line: &str) -> bool {
    EMAIL_RE.is_match(line)
}

pub fn has_url(line: &str) -> bool {
    URL_RE.is_match(line)
}

/// True if the line holds a run of at least nine digits that stands on its own,
/// i.e. is not glued to letters and is not part of a dotted version number.
/// Runs of years such as `2015 - 2019` are date ranges, not phones.
pub fn has_phone(line: &str) -> bool {
    PHONE_CANDIDATE_RE.find_iter(line).any(|m| {
        let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
        if digits < MIN_PHONE_DIGITS || year_groups(m.as_str()) > MAX_YEAR_GROUPS {
            return false;
        }
        let mut before_chars = line[..m.start()].chars().rev();
        let before = before_chars.next();
        let before_before = before_chars.next();
        let mut after = line[m.end()..].chars();
        let next = after.next();
        let next_next = after.next();

        let glued_before = match before {
            Some(c) if c.is_alphanumeric() || c == '_' => true,
            Some('.') => matches!(before_before, Some(c) if c.is_ascii_digit()),
            _ => false,
        };
        let glued_after = match next {
            Some(c) if c.is_alphanumeric() || c == '_' => true,
            Some('.') => matches!(next_next, Some(c) if c.is_ascii_digit()),
            _ => false,
        };
        !glued_before && !glued_after
    })
}

/// Counts four-digit groups starting with 19 or 20.
fn year_groups(run: &str) -> usize {
    run.split(|c: char| !c.is_ascii_digit())
        .filter(|g| g.len() == 4 && (g.starts_with("19") || g.starts_with("20")))
        .count()
}

/// True for lines that look like contact details: an email, phone, or URL, or an
/// explicit mention of email/phone/linkedin/github.
pub fn is_contact_line(line: &str) -> bool {
    has_email(line) || has_phone(line) || has_url(line) || CONTACT_WORD_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_detection() {
        assert!(has_email("jane.doe+cv@mail.example.com"));
        assert!(has_email("Email: jane@example.io | Phone"));
        assert!(!has_email("jane@localhost"));
        assert!(!has_email("C++, C#, @mentions"));
    }

    #[test]
    fn test_phone_detection_accepts_common_formats() {
        assert!(has_phone("+1 (555) 123-4567"));
        assert!(has_phone("555-123-4567 ext"));
        assert!(has_phone("Phone: +44 20 7946 0958"));
        assert!(has_phone("Call 5551234567."));
        assert!(has_phone("Tel.555-123-4567"));
    }

    #[test]
    fn test_phone_detection_rejects_date_ranges() {
        assert!(!has_phone("2015 - 2019 (4 years)"));
        assert!(!has_phone("Class of 2019-2023 2020-2024"));
        assert!(has_phone("+1 555 123 2019"));
    }

    #[test]
    fn test_phone_detection_rejects_short_and_versions() {
        assert!(!has_phone("2019-2023"));
        assert!(!has_phone("Python 3.11, C++17"));
        assert!(!has_phone("v1.2.345678901"));
        assert!(!has_phone("123456789.12"));
        assert!(!has_phone("ID ABC123456789XYZ"));
        assert!(!has_phone("Budget of 12345678"));
    }

    #[test]
    fn test_url_detection() {
        assert!(has_url("https://github.com/jane"));
        assert!(has_url("Portfolio: www.janedoe.dev"));
        assert!(has_url("HTTP://EXAMPLE.COM"));
        assert!(!has_url("linkedin.com/in/jane"));
    }

    #[test]
    fn test_contact_words() {
        assert!(is_contact_line("LinkedIn: linkedin.com/in/jane"));
        assert!(is_contact_line("GitHub - janedoe"));
        assert!(!is_contact_line("Githubber extraordinaire"));
        assert!(!is_contact_line("Senior Software Engineer"));
    }
}
