use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//
// ─── SHAPE ─────────────────────────────────────────────────────────────────────
//

/// Which list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Experience,
    Education,
    Project,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [Self::Experience, Self::Education, Self::Project];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Project => "Project",
        }
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Experience => "Work Experience",
            Self::Education => "Education",
            Self::Project => "Projects",
        }
    }

    /// Field path prefix used in validation errors.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Project => "projects",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub mobile: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

/// One row of the experience, education or project lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeEntry {
    pub title: String,
    pub organization: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub current: bool,
}

impl ResumeEntry {
    #[must_use]
    pub fn date_range(&self) -> String {
        let end = if self.current {
            "Present"
        } else {
            self.end_date.as_deref().unwrap_or("")
        };
        format!("{} - {end}", self.start_date)
    }
}

/// Raw form values of the resume builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDraft {
    pub contact_info: ContactInfo,
    pub summary: String,
    pub skills: String,
    pub experience: Vec<ResumeEntry>,
    pub education: Vec<ResumeEntry>,
    pub projects: Vec<ResumeEntry>,
}

impl ResumeDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self, kind: EntryKind) -> &[ResumeEntry] {
        match kind {
            EntryKind::Experience => &self.experience,
            EntryKind::Education => &self.education,
            EntryKind::Project => &self.projects,
        }
    }

    pub fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<ResumeEntry> {
        match kind {
            EntryKind::Experience => &mut self.experience,
            EntryKind::Education => &mut self.education,
            EntryKind::Project => &mut self.projects,
        }
    }

    /// Render the current values as Markdown.
    ///
    /// Works on unvalidated drafts so the builder can preview while typing.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        let mut contact = vec![self.contact_info.email.clone()];
        if let Some(mobile) = &self.contact_info.mobile {
            contact.push(mobile.clone());
        }
        if let Some(linkedin) = &self.contact_info.linkedin {
            contact.push(format!("[LinkedIn]({linkedin})"));
        }
        if let Some(twitter) = &self.contact_info.twitter {
            contact.push(format!("[Twitter]({twitter})"));
        }
        let _ = write!(out, "## Contact Information\n\n{}\n\n", contact.join(" | "));
        let _ = write!(out, "## Professional Summary\n\n{}\n\n", self.summary);
        let _ = write!(out, "## Skills\n\n{}\n\n", self.skills);

        for kind in EntryKind::ALL {
            let entries = self.entries(kind);
            if entries.is_empty() {
                continue;
            }
            let _ = write!(out, "## {}\n\n", kind.heading());
            for entry in entries {
                let _ = write!(
                    out,
                    "### {} @ {}\n{}\n\n{}\n\n",
                    entry.title,
                    entry.organization,
                    entry.date_range(),
                    entry.description
                );
            }
        }

        out.trim_end().to_string()
    }

    /// Validate and normalize the draft.
    ///
    /// Every failing field is reported, not just the first one, so the form
    /// can show all messages at once.
    ///
    /// # Errors
    ///
    /// Returns `ResumeValidationError::Invalid` with one `FieldError` per
    /// failing field.
    pub fn validate(self) -> Result<Resume, ResumeValidationError> {
        let draft = self.normalized();
        let mut errors = Vec::new();

        if !is_email(&draft.contact_info.email) {
            errors.push(FieldError::new("contact_info.email", "Invalid email address"));
        }
        for (field, value) in [
            ("contact_info.linkedin", draft.contact_info.linkedin.as_deref()),
            ("contact_info.twitter", draft.contact_info.twitter.as_deref()),
        ] {
            if value.is_some_and(|v| Url::parse(v).is_err()) {
                errors.push(FieldError::new(field, "Invalid URL"));
            }
        }
        if draft.summary.is_empty() {
            errors.push(FieldError::new("summary", "Professional summary is required"));
        }
        if draft.skills.is_empty() {
            errors.push(FieldError::new("skills", "Skills are required"));
        }

        for kind in EntryKind::ALL {
            for (index, entry) in draft.entries(kind).iter().enumerate() {
                validate_entry(kind, index, entry, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(Resume { draft })
        } else {
            Err(ResumeValidationError::Invalid(errors))
        }
    }

    fn normalized(mut self) -> Self {
        self.contact_info.email = self.contact_info.email.trim().to_string();
        self.contact_info.mobile = normalize_optional(self.contact_info.mobile);
        self.contact_info.linkedin = normalize_optional(self.contact_info.linkedin);
        self.contact_info.twitter = normalize_optional(self.contact_info.twitter);
        self.summary = self.summary.trim().to_string();
        self.skills = self.skills.trim().to_string();
        for kind in EntryKind::ALL {
            for entry in self.entries_mut(kind) {
                entry.title = entry.title.trim().to_string();
                entry.organization = entry.organization.trim().to_string();
                entry.start_date = entry.start_date.trim().to_string();
                entry.description = entry.description.trim().to_string();
                entry.end_date = if entry.current {
                    None
                } else {
                    normalize_optional(entry.end_date.take())
                };
            }
        }
        self
    }
}

fn validate_entry(
    kind: EntryKind,
    index: usize,
    entry: &ResumeEntry,
    errors: &mut Vec<FieldError>,
) {
    let path = |name: &str| format!("{}[{index}].{name}", kind.field());
    if entry.title.is_empty() {
        errors.push(FieldError::new(path("title"), "Title is required"));
    }
    if entry.organization.is_empty() {
        errors.push(FieldError::new(path("organization"), "Organization is required"));
    }
    if entry.start_date.is_empty() {
        errors.push(FieldError::new(path("start_date"), "Start date is required"));
    }
    if entry.description.is_empty() {
        errors.push(FieldError::new(path("description"), "Description is required"));
    }
    if !entry.current && entry.end_date.is_none() {
        errors.push(FieldError::new(
            path("end_date"),
            "End date is required unless this is your current position",
        ));
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResumeValidationError {
    #[error("resume has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
}

impl ResumeValidationError {
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid(errors) => errors,
        }
    }

    /// First message reported for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.field_errors()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

//
// ─── VALIDATED RESUME ──────────────────────────────────────────────────────────
//

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    draft: ResumeDraft,
}

impl Resume {
    /// Rehydrate a stored draft, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `ResumeValidationError` if the stored draft no longer validates.
    pub fn from_persisted(draft: ResumeDraft) -> Result<Self, ResumeValidationError> {
        draft.validate()
    }

    #[must_use]
    pub fn draft(&self) -> &ResumeDraft {
        &self.draft
    }

    #[must_use]
    pub fn into_draft(self) -> ResumeDraft {
        self.draft
    }

    /// Render the resume as Markdown for preview and export.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        self.draft.to_markdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ResumeDraft {
        ResumeDraft {
            contact_info: ContactInfo {
                email: " jane@example.com ".into(),
                mobile: Some("  ".into()),
                linkedin: Some("https://www.linkedin.com/in/jane".into()),
                twitter: None,
            },
            summary: "Backend engineer.".into(),
            skills: "Rust, SQL".into(),
            experience: vec![ResumeEntry {
                title: "Engineer".into(),
                organization: "Acme".into(),
                start_date: "2020-01".into(),
                end_date: Some("2022-06".into()),
                description: "Built things.".into(),
                current: false,
            }],
            education: Vec::new(),
            projects: vec![ResumeEntry {
                title: "Coach".into(),
                organization: "Side project".into(),
                start_date: "2023-01".into(),
                end_date: Some("ignored".into()),
                description: "Quiz app.".into(),
                current: true,
            }],
        }
    }

    #[test]
    fn valid_draft_is_normalized() {
        let resume = valid_draft().validate().unwrap();
        let d = resume.draft();
        assert_eq!(d.contact_info.email, "jane@example.com");
        assert_eq!(d.contact_info.mobile, None);
        assert_eq!(d.projects[0].end_date, None);
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let err = ResumeDraft::new().validate().unwrap_err();
        assert_eq!(
            err.message_for("contact_info.email"),
            Some("Invalid email address")
        );
        assert_eq!(
            err.message_for("summary"),
            Some("Professional summary is required")
        );
        assert_eq!(err.message_for("skills"), Some("Skills are required"));
        assert_eq!(err.field_errors().len(), 3);
    }

    #[test]
    fn entry_without_end_date_must_be_current() {
        let mut draft = valid_draft();
        draft.experience[0].end_date = None;
        let err = draft.validate().unwrap_err();
        assert!(err.message_for("experience[0].end_date").is_some());
    }

    #[test]
    fn malformed_email_and_urls_are_rejected() {
        let mut draft = valid_draft();
        draft.contact_info.email = "not-an-email".into();
        draft.contact_info.twitter = Some("twitter dot com".into());
        let err = draft.validate().unwrap_err();
        assert!(err.message_for("contact_info.email").is_some());
        assert_eq!(err.message_for("contact_info.twitter"), Some("Invalid URL"));
    }

    #[test]
    fn markdown_contains_sections_and_skips_empty_lists() {
        let md = valid_draft().validate().unwrap().to_markdown();
        assert!(md.starts_with("## Contact Information"));
        assert!(md.contains("jane@example.com | [LinkedIn](https://www.linkedin.com/in/jane)"));
        assert!(md.contains("## Work Experience\n\n### Engineer @ Acme\n2020-01 - 2022-06"));
        assert!(md.contains("2023-01 - Present"));
        assert!(!md.contains("## Education"));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.io"));
        assert!(!is_email("a@@b.io"));
    }
}
