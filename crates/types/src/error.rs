use serde::Serialize;
use thiserror::Error;

/// Uniform error raised when a navigation answers with a status of 400 or more.
///
/// The message is the best available description extracted from the error
/// body; `status` is the numeric HTTP status of the failing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct HttpError {
    pub message: String,
    pub status: u16,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

/// Returned when an operation type string is not one of the seven known types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported fetch action type {0}")]
pub struct ParseOperationKindError(pub String);
