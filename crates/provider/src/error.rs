use halbridge_api::ApiError;
use halbridge_types::{HttpError, OperationKind, ParseOperationKindError};
use thiserror::Error;

/// Everything a data provider call can fail with.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A navigation answered with status 400 or above.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The HAL client could not complete a navigation. Passed through as-is.
    #[error(transparent)]
    Transport(#[from] ApiError),

    #[error("Unsupported fetch action type {0}")]
    Unsupported(String),

    /// The params do not fit the operation; raised before any request.
    #[error("invalid params for {kind} on '{resource}': {reason}")]
    InvalidParams {
        kind: OperationKind,
        resource: String,
        reason: String,
    },
}

impl ProviderError {
    /// HTTP status of a uniform error, `None` for every other failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(error) => Some(error.status),
            _ => None,
        }
    }

    pub fn invalid_params(kind: OperationKind, resource: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            kind,
            resource: resource.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ParseOperationKindError> for ProviderError {
    fn from(error: ParseOperationKindError) -> Self {
        Self::Unsupported(error.0)
    }
}
