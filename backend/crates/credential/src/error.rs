//! Credential Error Types
//!
//! Credential-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Credential-specific result type alias
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Credential-specific error variants
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Work factor rejected before any hashing was attempted
    #[error("Invalid work factor: {0}")]
    InvalidWorkFactor(String),

    /// Digest string is not a well-formed bcrypt digest
    #[error("Malformed digest: {0}")]
    MalformedDigest(String),

    /// The hashing primitive itself failed
    #[error("Hashing failed: {0}")]
    Hashing(String),

    /// Blocking worker panicked or was cancelled
    #[error("Hashing worker failed: {0}")]
    Worker(String),

    /// Self-check produced a result that must not be reported as success
    #[error("Credential self-check failed (matched={matched}, wrong_accepted={wrong_accepted})")]
    SelfCheckFailed { matched: bool, wrong_accepted: bool },
}

impl CredentialError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CredentialError::InvalidWorkFactor(_) => StatusCode::BAD_REQUEST,
            CredentialError::MalformedDigest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CredentialError::Hashing(_)
            | CredentialError::Worker(_)
            | CredentialError::SelfCheckFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::InvalidWorkFactor(_) => ErrorKind::BadRequest,
            CredentialError::MalformedDigest(_) => ErrorKind::UnprocessableEntity,
            CredentialError::Hashing(_)
            | CredentialError::Worker(_)
            | CredentialError::SelfCheckFailed { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CredentialError::SelfCheckFailed {
                matched,
                wrong_accepted,
            } => {
                tracing::error!(
                    matched = matched,
                    wrong_accepted = wrong_accepted,
                    "Credential self-check failed"
                );
            }
            CredentialError::Hashing(msg) | CredentialError::Worker(msg) => {
                tracing::error!(message = %msg, "Credential hashing error");
            }
            CredentialError::MalformedDigest(reason) => {
                tracing::warn!(reason = %reason, "Malformed digest rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Credential error");
            }
        }
    }
}

impl From<PasswordHashError> for CredentialError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            e @ PasswordHashError::InvalidWorkFactor { .. } => {
                CredentialError::InvalidWorkFactor(e.to_string())
            }
            PasswordHashError::MalformedDigest(reason) => CredentialError::MalformedDigest(reason),
            PasswordHashError::HashingFailed(msg) => CredentialError::Hashing(msg),
        }
    }
}

impl From<tokio::task::JoinError> for CredentialError {
    fn from(err: tokio::task::JoinError) -> Self {
        CredentialError::Worker(err.to_string())
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        // Empty body: digest parsing details stay in the logs
        (status, ()).into_response()
    }
}
