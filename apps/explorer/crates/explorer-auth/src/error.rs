//! Authentication error types.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("{0}")]
    InvalidCredentials(String),

    /// Malformed sign-in or sign-up input
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that already has an account
    #[error("User with email {0} already exists")]
    EmailTaken(String),

    /// Token could not be decoded or its signature does not match
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token is well formed but past its expiry
    #[error("Session expired")]
    TokenExpired,

    /// Token refers to a user that no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] explorer_storage::StorageError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network unavailable (transient error, can retry)
    #[error("Network unavailable")]
    NetworkUnavailable,
}

impl AuthError {
    /// Returns true if this error is transient and the operation can be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::NetworkUnavailable)
    }

    /// Message meant for the person at the keyboard, if the service produced
    /// one. Internal failures return `None` so callers fall back to their own
    /// generic wording.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AuthError::InvalidCredentials(_)
            | AuthError::Validation(_)
            | AuthError::EmailTaken(_)
            | AuthError::TokenExpired
            | AuthError::NetworkUnavailable => Some(self.to_string()),
            AuthError::InvalidToken(_)
            | AuthError::UserNotFound
            | AuthError::Storage(_)
            | AuthError::Json(_) => None,
        }
    }
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
