use coach_core::model::{EntryKind, FieldError, ResumeDraft, ResumeEntry, ResumeValidationError};

use crate::vm::markdown_vm::markdown_to_html;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResumeTab {
    #[default]
    Edit,
    Preview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Mobile,
    Linkedin,
    Twitter,
}

impl ContactField {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Email => "contact_info.email",
            Self::Mobile => "contact_info.mobile",
            Self::Linkedin => "contact_info.linkedin",
            Self::Twitter => "contact_info.twitter",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Organization,
    StartDate,
    EndDate,
    Description,
}

impl EntryField {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Organization => "organization",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Description => "description",
        }
    }
}

/// Error key for one field of one entry, e.g. `experience[0].title`.
#[must_use]
pub fn entry_field_path(kind: EntryKind, index: usize, field: EntryField) -> String {
    format!("{}[{index}].{}", kind.field(), field.name())
}

/// Editable state of the resume builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResumeFormVm {
    draft: ResumeDraft,
    errors: Vec<FieldError>,
    tab: ResumeTab,
    dirty: bool,
}

impl ResumeFormVm {
    #[must_use]
    pub fn new(draft: ResumeDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn draft(&self) -> &ResumeDraft {
        &self.draft
    }

    #[must_use]
    pub fn tab(&self) -> ResumeTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ResumeTab) {
        self.tab = tab;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_contact(&mut self, field: ContactField, value: String) {
        let contact = &mut self.draft.contact_info;
        let optional = (!value.trim().is_empty()).then(|| value.clone());
        match field {
            ContactField::Email => contact.email = value,
            ContactField::Mobile => contact.mobile = optional,
            ContactField::Linkedin => contact.linkedin = optional,
            ContactField::Twitter => contact.twitter = optional,
        }
        self.touch(field.path());
    }

    #[must_use]
    pub fn contact_value(&self, field: ContactField) -> &str {
        let contact = &self.draft.contact_info;
        match field {
            ContactField::Email => &contact.email,
            ContactField::Mobile => contact.mobile.as_deref().unwrap_or(""),
            ContactField::Linkedin => contact.linkedin.as_deref().unwrap_or(""),
            ContactField::Twitter => contact.twitter.as_deref().unwrap_or(""),
        }
    }

    pub fn set_summary(&mut self, value: String) {
        self.draft.summary = value;
        self.touch("summary");
    }

    pub fn set_skills(&mut self, value: String) {
        self.draft.skills = value;
        self.touch("skills");
    }

    pub fn add_entry(&mut self, kind: EntryKind) {
        self.draft.entries_mut(kind).push(ResumeEntry::default());
        self.dirty = true;
    }

    /// Remove an entry. Errors for that list are dropped since indices shift.
    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) {
        let entries = self.draft.entries_mut(kind);
        if index < entries.len() {
            entries.remove(index);
            let prefix = format!("{}[", kind.field());
            self.errors.retain(|e| !e.field.starts_with(&prefix));
            self.dirty = true;
        }
    }

    pub fn set_entry_field(
        &mut self,
        kind: EntryKind,
        index: usize,
        field: EntryField,
        value: String,
    ) {
        let Some(entry) = self.draft.entries_mut(kind).get_mut(index) else {
            return;
        };
        match field {
            EntryField::Title => entry.title = value,
            EntryField::Organization => entry.organization = value,
            EntryField::StartDate => entry.start_date = value,
            EntryField::EndDate => {
                entry.end_date = (!value.trim().is_empty()).then_some(value);
            }
            EntryField::Description => entry.description = value,
        }
        self.touch(&entry_field_path(kind, index, field));
    }

    /// Toggle "current"; a current entry has no end date.
    pub fn set_entry_current(&mut self, kind: EntryKind, index: usize, current: bool) {
        let Some(entry) = self.draft.entries_mut(kind).get_mut(index) else {
            return;
        };
        entry.current = current;
        if current {
            entry.end_date = None;
        }
        self.touch(&entry_field_path(kind, index, EntryField::EndDate));
    }

    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn apply_errors(&mut self, err: &ResumeValidationError) {
        self.errors = err.field_errors().to_vec();
    }

    /// Replace the draft with what was stored and clear error state.
    pub fn mark_saved(&mut self, draft: ResumeDraft) {
        self.draft = draft;
        self.errors.clear();
        self.dirty = false;
    }

    #[must_use]
    pub fn preview_markdown(&self) -> String {
        self.draft.to_markdown()
    }

    #[must_use]
    pub fn preview_html(&self) -> String {
        markdown_to_html(&self.preview_markdown())
    }

    fn touch(&mut self, field: &str) {
        self.dirty = true;
        self.errors.retain(|e| e.field != field);
    }
}
