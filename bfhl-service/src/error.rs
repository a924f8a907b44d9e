use crate::services::providers::ProviderError;
use service_core::error::AppError;
use thiserror::Error;

/// Failure outcomes of a `/bfhl` request.
#[derive(Debug, Error)]
pub enum BfhlError {
    #[error("invalid JSON body")]
    InvalidJsonBody,

    #[error("exactly one operation key required")]
    NoOperation,

    #[error("only one operation key allowed")]
    AmbiguousOperation,

    #[error("{0}")]
    InvalidInput(String),

    #[error("AI service unavailable")]
    ServiceUnavailable(#[source] ProviderError),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl BfhlError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        BfhlError::InvalidInput(msg.into())
    }
}

impl From<BfhlError> for AppError {
    fn from(err: BfhlError) -> Self {
        let message = err.to_string();
        match err {
            BfhlError::ServiceUnavailable(_) => AppError::ServiceUnavailable(message),
            BfhlError::Internal(inner) => AppError::InternalError(inner),
            _ => AppError::BadRequest(anyhow::anyhow!(message)),
        }
    }
}
