//! Authentication for News Explorer.
//!
//! This crate provides:
//! - The [`AuthService`] contract the orchestrator talks to
//! - [`MockAuthService`], a profile-local backend with a seeded demo account,
//!   salted password digests and signed expiring tokens

mod error;
mod mock;
mod service;

pub use error::{AuthError, AuthResult};
pub use mock::{
    MockAuthService, DEFAULT_TOKEN_TTL_DAYS, DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD,
    MIN_PASSWORD_LEN,
};
pub use service::{AuthGrant, AuthService, Credentials, Registration};
