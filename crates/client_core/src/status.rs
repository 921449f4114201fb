use std::fmt;

const SUCCESS_MARKER: &str = "✅";
const ERROR_MARKER: &str = "❌";

pub const PERSON_ADDED: &str = "Person added successfully!";
pub const PERSON_ADD_FAILED: &str = "Error adding person. Please try again.";
pub const PERSON_UPDATED: &str = "Person updated successfully!";
pub const PERSON_UPDATE_FAILED: &str = "Error updating person";
pub const PERSON_DELETED: &str = "Person deleted successfully!";
pub const PERSON_DELETE_FAILED: &str = "Error deleting person";
pub const PEOPLE_FETCH_FAILED: &str = "Error fetching people";
pub const FIELDS_REQUIRED: &str = "All fields are required!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The single status line a controller shows. Its kind is read back from the
/// marker in the text, so anything without the success marker renders as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn success(text: &str) -> Self {
        Self::new(format!("{SUCCESS_MARKER} {text}"))
    }

    pub fn error(text: &str) -> Self {
        Self::new(format!("{ERROR_MARKER} {text}"))
    }

    pub fn kind(&self) -> StatusKind {
        if self.text.contains(SUCCESS_MARKER) {
            StatusKind::Success
        } else {
            StatusKind::Error
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind() == StatusKind::Success
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
