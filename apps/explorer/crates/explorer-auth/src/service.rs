//! The auth service contract.

use crate::AuthResult;
use async_trait::async_trait;
use explorer_types::UserRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign-in input.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-up input.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub user: UserRecord,
    pub token: String,
}

/// Token verification, sign-in, and sign-up.
///
/// Tokens are opaque to callers; only the service that issued one can
/// interpret it.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a previously issued token to its user.
    async fn verify_token(&self, token: &str) -> AuthResult<UserRecord>;

    /// Authenticate existing credentials.
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthGrant>;

    /// Create an account and sign it in.
    async fn register(&self, registration: &Registration) -> AuthResult<AuthGrant>;
}
