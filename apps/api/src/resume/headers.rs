//! Section header recognition.
//!
//! A header is a line whose label (optionally followed by `:` / `-` / dash and
//! inline text) matches one of the known aliases below.

use std::sync::LazyLock;

use regex::Regex;

use crate::resume::model::SectionKey;

/// Normalized header label → canonical section.
/// Labels are uppercase, single-spaced, with `&` spelled `AND`.
const HEADER_ALIASES: &[(&str, SectionKey)] = &[
    ("SUMMARY", SectionKey::Summary),
    ("PROFESSIONAL SUMMARY", SectionKey::Summary),
    ("CAREER SUMMARY", SectionKey::Summary),
    ("EXECUTIVE SUMMARY", SectionKey::Summary),
    ("SUMMARY OF QUALIFICATIONS", SectionKey::Summary),
    ("PROFILE", SectionKey::Summary),
    ("PROFESSIONAL PROFILE", SectionKey::Summary),
    ("OBJECTIVE", SectionKey::Summary),
    ("CAREER OBJECTIVE", SectionKey::Summary),
    ("ABOUT ME", SectionKey::Summary),
    ("EXPERIENCE", SectionKey::Experience),
    ("WORK EXPERIENCE", SectionKey::Experience),
    ("PROFESSIONAL EXPERIENCE", SectionKey::Experience),
    ("RELEVANT EXPERIENCE", SectionKey::Experience),
    ("EMPLOYMENT", SectionKey::Experience),
    ("EMPLOYMENT HISTORY", SectionKey::Experience),
    ("WORK HISTORY", SectionKey::Experience),
    ("CAREER HISTORY", SectionKey::Experience),
    ("EDUCATION", SectionKey::Education),
    ("EDUCATION AND TRAINING", SectionKey::Education),
    ("ACADEMIC BACKGROUND", SectionKey::Education),
    ("ACADEMIC QUALIFICATIONS", SectionKey::Education),
    ("SKILLS", SectionKey::Skills),
    ("TECHNICAL SKILLS", SectionKey::Skills),
    ("CORE SKILLS", SectionKey::Skills),
    ("KEY SKILLS", SectionKey::Skills),
    ("SKILLS SUMMARY", SectionKey::Skills),
    ("SKILLS AND TOOLS", SectionKey::Skills),
    ("CORE COMPETENCIES", SectionKey::Skills),
    ("COMPETENCIES", SectionKey::Skills),
    ("AREAS OF EXPERTISE", SectionKey::Skills),
    ("CERTIFICATIONS", SectionKey::Certifications),
    ("CERTIFICATION", SectionKey::Certifications),
    ("CERTIFICATES", SectionKey::Certifications),
    ("LICENSES AND CERTIFICATIONS", SectionKey::Certifications),
    ("CERTIFICATIONS AND LICENSES", SectionKey::Certifications),
    ("PROJECTS", SectionKey::Projects),
    ("KEY PROJECTS", SectionKey::Projects),
    ("PERSONAL PROJECTS", SectionKey::Projects),
    ("SELECTED PROJECTS", SectionKey::Projects),
    ("NOTE", SectionKey::Note),
    ("NOTES", SectionKey::Note),
    ("ADDITIONAL NOTES", SectionKey::Note),
];

/// `Label: text`, `Label - text`, `Label – text`, `Label — text`, or a bare `Label:`.
static LABELLED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z&/\s]+?)\s*[:\-–—]\s*(.*)$").expect("header pattern is valid")
});

/// Looks up a raw label in the alias table.
pub fn lookup_alias(label: &str) -> Option<SectionKey> {
    let normalized = normalize_label(label);
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, key)| *key)
}

/// Recognizes a section header line.
///
/// Returns the section and any inline text that followed the label on the same
/// line. Leading markdown heading marks (`##`) are ignored.
pub fn recognize_header(line: &str) -> Option<(SectionKey, Option<String>)> {
    let candidate = line.trim_start_matches('#').trim();
    if candidate.is_empty() {
        return None;
    }

    if let Some(caps) = LABELLED_LINE_RE.captures(candidate) {
        if let Some(key) = lookup_alias(&caps[1]) {
            let inline = caps[2].trim();
            let inline = (!inline.is_empty()).then(|| inline.to_string());
            return Some((key, inline));
        }
    }

    lookup_alias(candidate).map(|key| (key, None))
}

fn normalize_label(label: &str) -> String {
    label
        .replace('&', " AND ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
