//! Resume text parser. Turns loosely structured generated text into a `ParsedResume`.
//!
//! # Contract
//! `parse` never fails. Missing structure degrades to coarser buckets (text with no
//! recognizable header ends up in SUMMARY) instead of being rejected.
//!
//! # Line classification
//! - Before the first header (preamble): first non-contact line is the name,
//!   contact-looking lines are contacts, everything else is SUMMARY prose.
//! - Header line: switches the current section; inline text after the label
//!   becomes that section's next paragraph.
//! - Bullet line: a bullet of the current section, or of the open job entry.
//! - EXPERIENCE line with `|`: opens a job entry.
//! - SKILLS line: kept verbatim in `lines` (`Category: items`).
//! - Anything else: a paragraph.

use tracing::debug;

use crate::resume::headers::recognize_header;
use crate::resume::model::{ExperienceEntry, ParsedResume, SectionKey};
use crate::resume::patterns::{has_email, has_phone, has_url, is_contact_line};

const BULLET_MARKERS: &[char] = &['•', '-', '*', '●', '▪', '◦', '·', '–'];

/// Parses raw resume text. Always returns a best-effort structure.
pub fn parse(raw_text: &str) -> ParsedResume {
    let mut parser = Parser::new();
    for line in raw_text.lines().map(clean_line).filter(|l| !l.is_empty()) {
        parser.feed(&line);
    }
    let resume = parser.resume;

    debug!(
        "Parsed resume: name={}, contacts={}, sections={:?}",
        resume.name.is_some(),
        resume.contacts().len(),
        resume
            .non_empty_sections()
            .map(|(key, _)| key)
            .collect::<Vec<_>>()
    );
    resume
}

struct Parser {
    resume: ParsedResume,
    current: Option<SectionKey>,
    /// True while bullets should attach to the last experience entry.
    entry_open: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            resume: ParsedResume::new(),
            current: None,
            entry_open: false,
        }
    }

    fn feed(&mut self, line: &str) {
        if let Some((key, inline)) = recognize_header(line) {
            self.current = Some(key);
            self.entry_open = false;
            if let Some(text) = inline {
                self.resume.section_mut(key).paragraphs.push(text);
            }
            return;
        }

        let Some(key) = self.current else {
            self.feed_preamble(line);
            return;
        };

        if let Some(item) = strip_bullet(line) {
            if !item.is_empty() {
                self.push_bullet(key, item);
            }
            return;
        }

        self.entry_open = false;
        let section = self.resume.section_mut(key);
        match key {
            SectionKey::Experience if line.contains('|') => {
                section.entries.push(ExperienceEntry {
                    header: format_entry_header(line),
                    bullets: Vec::new(),
                });
                self.entry_open = true;
            }
            SectionKey::Skills => section.lines.push(line.to_string()),
            _ => section.paragraphs.push(line.to_string()),
        }
    }

    fn feed_preamble(&mut self, line: &str) {
        let looks_like_contact = has_email(line) || has_phone(line) || has_url(line);
        if self.resume.name.is_none() && !looks_like_contact {
            // A bare "Name:" label leaves the slot for the next line.
            let name = strip_name_label(line);
            if !name.is_empty() {
                self.resume.name = Some(name.to_string());
            }
        } else if is_contact_line(line) {
            self.resume.add_contact(line);
        } else {
            self.resume
                .section_mut(SectionKey::Summary)
                .paragraphs
                .push(line.to_string());
        }
    }

    fn push_bullet(&mut self, key: SectionKey, item: String) {
        let section = self.resume.section_mut(key);
        if key == SectionKey::Experience && self.entry_open {
            if let Some(entry) = section.entries.last_mut() {
                entry.bullets.push(item);
                return;
            }
        }
        section.bullets.push(item);
    }
}

/// Trims the line and drops markdown bold markers.
fn clean_line(line: &str) -> String {
    line.replace("**", "").trim().to_string()
}

/// Returns the bullet text if the line starts with a bullet marker.
fn strip_bullet(line: &str) -> Option<String> {
    if !line.starts_with(BULLET_MARKERS) {
        return None;
    }
    let text = line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c.is_whitespace());
    Some(text.trim().to_string())
}

/// Formats a `Role | Company | Dates` line as a job header.
///
/// Three parts → `role | company — dates`, two → `role — company`, anything else
/// is re-joined with ` | `. Empty parts (stray leading/trailing pipes) are ignored.
fn format_entry_header(line: &str) -> String {
    // Empty parts are dropped before counting, so `Role | Company |` reads as two
    // parts rather than a literal three-part header.
    let parts: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [role, company, dates] => format!("{role} | {company} — {dates}"),
        [role, company] => format!("{role} — {company}"),
        [] => line.trim().to_string(),
        _ => parts.join(" | "),
    }
}

/// "Name: Jane Doe" → "Jane Doe".
fn strip_name_label(line: &str) -> &str {
    match line.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("name:") => line[5..].trim(),
        _ => line,
    }
}
