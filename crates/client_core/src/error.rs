use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single backend call.
///
/// Controllers collapse every variant into one user-facing message per
/// operation; the variant and its detail only reach the logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{operation} request to {url} failed: {source}")]
    Transport {
        operation: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} request to {url} returned status {status}")]
    Status {
        operation: &'static str,
        url: String,
        status: StatusCode,
    },
    #[error("{operation} response from {url} could not be decoded: {source}")]
    Decode {
        operation: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn operation(&self) -> &'static str {
        match self {
            ClientError::Transport { operation, .. }
            | ClientError::Status { operation, .. }
            | ClientError::Decode { operation, .. } => operation,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
