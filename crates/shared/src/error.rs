use thiserror::Error;

use crate::domain::PersonField;

/// Client-side rejection of a person record before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(PersonField),
    #[error("unknown person field: {0}")]
    UnknownField(String),
}
