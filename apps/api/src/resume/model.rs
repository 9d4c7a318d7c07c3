//! Structured form of a generated resume, produced by the parser and consumed
//! once by the renderer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The fixed vocabulary every section header normalizes to.
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Note,
}

impl SectionKey {
    /// All keys in canonical display order.
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Certifications,
        SectionKey::Projects,
        SectionKey::Note,
    ];

    /// Header text shown in the rendered document.
    pub fn display_title(self) -> &'static str {
        match self {
            SectionKey::Summary => "Summary",
            SectionKey::Experience => "Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Certifications => "Certifications",
            SectionKey::Projects => "Projects",
            SectionKey::Note => "Note",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// One job in the experience section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceEntry {
    /// Role, company and dates already formatted for display.
    pub header: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionBody {
    pub paragraphs: Vec<String>,
    /// `Category: items` style rows (skills).
    pub lines: Vec<String>,
    pub bullets: Vec<String>,
    pub entries: Vec<ExperienceEntry>,
}

impl SectionBody {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
            && self.lines.is_empty()
            && self.bullets.is_empty()
            && self.entries.is_empty()
    }
}

/// Best-effort structure recovered from resume text.
///
/// Every canonical section is always present (possibly empty); storage is a
/// fixed array indexed by `SectionKey`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    contacts: Vec<String>,
    #[serde(serialize_with = "serialize_sections")]
    sections: [SectionBody; 7],
}

impl ParsedResume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contact items, deduplicated, in first-seen order.
    pub fn contacts(&self) -> &[String] {
        &self.contacts
    }

    /// Appends a contact unless an identical one is already present.
    pub fn add_contact(&mut self, contact: impl Into<String>) {
        let contact = contact.into();
        if !self.contacts.contains(&contact) {
            self.contacts.push(contact);
        }
    }

    pub fn section(&self, key: SectionKey) -> &SectionBody {
        &self.sections[key.slot()]
    }

    pub fn section_mut(&mut self, key: SectionKey) -> &mut SectionBody {
        &mut self.sections[key.slot()]
    }

    /// Every section in canonical order, empty ones included.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKey, &SectionBody)> {
        SectionKey::ALL.into_iter().map(|key| (key, self.section(key)))
    }

    /// Sections that have content, in canonical order.
    pub fn non_empty_sections(&self) -> impl Iterator<Item = (SectionKey, &SectionBody)> {
        self.sections().filter(|(_, body)| !body.is_empty())
    }
}

fn serialize_sections<S: Serializer>(
    sections: &[SectionBody; 7],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(sections.len()))?;
    for key in SectionKey::ALL {
        map.serialize_entry(&key, &sections[key.slot()])?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resume_has_all_seven_sections() {
        let resume = ParsedResume::new();
        let keys: Vec<SectionKey> = resume.sections().map(|(k, _)| k).collect();
        assert_eq!(keys, SectionKey::ALL.to_vec());
        assert_eq!(resume.non_empty_sections().count(), 0);
    }

    #[test]
    fn test_add_contact_dedupes_keeping_first() {
        let mut resume = ParsedResume::new();
        resume.add_contact("jane@example.com");
        resume.add_contact("+1 555 123 4567");
        resume.add_contact("jane@example.com");
        assert_eq!(resume.contacts(), ["jane@example.com", "+1 555 123 4567"]);
    }

    #[test]
    fn test_section_body_emptiness() {
        let mut body = SectionBody::default();
        assert!(body.is_empty());
        body.entries.push(ExperienceEntry::default());
        assert!(!body.is_empty());
    }

    #[test]
    fn test_serializes_sections_as_canonical_map() {
        let mut resume = ParsedResume::new();
        resume
            .section_mut(SectionKey::Skills)
            .lines
            .push("Languages: Rust".to_string());
        let json = serde_json::to_value(&resume).unwrap();
        let sections = json["sections"].as_object().unwrap();
        assert_eq!(sections.len(), 7);
        assert_eq!(json["sections"]["SKILLS"]["lines"][0], "Languages: Rust");
        assert!(json["sections"]["NOTE"]["paragraphs"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_display_titles() {
        let titles: Vec<&str> = SectionKey::ALL.iter().map(|k| k.display_title()).collect();
        assert_eq!(
            titles,
            vec![
                "Summary",
                "Experience",
                "Education",
                "Skills",
                "Certifications",
                "Projects",
                "Note"
            ]
        );
    }
}
