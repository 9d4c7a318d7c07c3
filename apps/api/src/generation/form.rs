//! The resume request form and its validation.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Target job field. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobField {
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    #[serde(rename = "Data Science")]
    DataScience,
    Marketing,
    Finance,
    Other,
}

impl JobField {
    pub fn label(self) -> &'static str {
        match self {
            JobField::SoftwareEngineering => "Software Engineering",
            JobField::DataScience => "Data Science",
            JobField::Marketing => "Marketing",
            JobField::Finance => "Finance",
            JobField::Other => "Other",
        }
    }
}

/// What the user submits. Every text field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub job_field: JobField,
}

impl ResumeForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            &self.name,
            &self.email,
            &self.phone,
            &self.education,
            &self.experience,
            &self.skills,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// The labelled block of user facts that goes into the generation prompt.
    pub fn user_details(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nEducation: {}\nExperience: {}\nSkills: {}",
            self.name.trim(),
            self.email.trim(),
            self.phone.trim(),
            self.education.trim(),
            self.experience.trim(),
            self.skills.trim(),
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_form() -> ResumeForm {
    ResumeForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+1 555 123 4567".to_string(),
        education: "BS Computer Science, State University, 2020".to_string(),
        experience: "Software Developer | Tech Corp | 2020-2023\n• Developed web applications"
            .to_string(),
        skills: "Python, Go, Rust".to_string(),
        job_field: JobField::SoftwareEngineering,
    }
}
