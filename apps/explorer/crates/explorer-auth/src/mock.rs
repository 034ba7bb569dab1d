//! Profile-local auth backend.
//!
//! Users live in the profile's key-value storage next to the token and saved
//! articles. Tokens have the shape `<payload>.<signature>`:
//!
//! ```text
//! payload   = base64url(json { sub, email, iat, exp })
//! signature = base64url(sha256(secret || "." || payload))
//! ```
//!
//! where `secret` is 32 random bytes generated once per profile.

use crate::{AuthError, AuthGrant, AuthResult, AuthService, Credentials, Registration};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use explorer_storage::{KeyValueStorage, StorageError, StorageKeys};
use explorer_types::UserRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Demo account seeded into every fresh profile.
pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_NAME: &str = "Test User";

pub const MIN_PASSWORD_LEN: usize = 6;
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    id: String,
    name: String,
    email: String,
    password_salt: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl StoredUser {
    fn new(email: &str, password: &str, name: &str) -> Self {
        let salt = URL_SAFE_NO_PAD.encode(random_bytes());
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&salt, password),
            password_salt: salt,
            created_at: Utc::now(),
        }
    }

    fn password_matches(&self, password: &str) -> bool {
        hash_password(&self.password_salt, password) == self.password_hash
    }

    fn record(&self) -> UserRecord {
        UserRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

fn random_bytes() -> [u8; 32] {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Auth backend that keeps its user table in profile storage.
pub struct MockAuthService {
    storage: Arc<dyn KeyValueStorage>,
    latency: Duration,
    offline: bool,
    token_ttl: chrono::Duration,
}

impl MockAuthService {
    /// Create a service over `storage`, sleeping `latency` before answering
    /// each call.
    pub fn new(storage: Arc<dyn KeyValueStorage>, latency: Duration) -> Self {
        Self {
            storage,
            latency,
            offline: false,
            token_ttl: chrono::Duration::days(DEFAULT_TOKEN_TTL_DAYS),
        }
    }

    /// Override how long issued tokens stay valid.
    pub fn with_token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// When offline, every call fails with `NetworkUnavailable` after the
    /// usual latency.
    pub fn with_outage(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    async fn simulate_network(&self) -> AuthResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline {
            warn!("Auth service unreachable");
            return Err(AuthError::NetworkUnavailable);
        }
        Ok(())
    }

    // ==========================================
    // User table
    // ==========================================

    fn load_users(&self) -> AuthResult<Vec<StoredUser>> {
        match self.storage.get(StorageKeys::MOCK_AUTH_USERS)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                let users = vec![StoredUser::new(DEMO_EMAIL, DEMO_PASSWORD, DEMO_NAME)];
                self.save_users(&users)?;
                info!(email = DEMO_EMAIL, "Seeded demo account");
                Ok(users)
            }
        }
    }

    fn save_users(&self, users: &[StoredUser]) -> AuthResult<()> {
        let json = serde_json::to_string(users)?;
        self.storage.set(StorageKeys::MOCK_AUTH_USERS, &json)?;
        Ok(())
    }

    // ==========================================
    // Tokens
    // ==========================================

    fn secret(&self) -> AuthResult<Vec<u8>> {
        if let Some(value) = self.storage.get(StorageKeys::MOCK_AUTH_SECRET)? {
            return URL_SAFE_NO_PAD
                .decode(value)
                .map_err(|e| AuthError::Storage(StorageError::Encoding(e.to_string())));
        }
        let secret = random_bytes();
        self.storage
            .set(StorageKeys::MOCK_AUTH_SECRET, &URL_SAFE_NO_PAD.encode(secret))?;
        debug!("Generated token signing secret");
        Ok(secret.to_vec())
    }

    fn sign(secret: &[u8], payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret);
        hasher.update(b".");
        hasher.update(payload.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }

    fn issue_token(&self, user: &StoredUser) -> AuthResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = Self::sign(&self.secret()?, &payload);
        Ok(format!("{}.{}", payload, signature))
    }

    fn decode_token(&self, token: &str) -> AuthResult<TokenClaims> {
        let (payload, signature) = token
            .trim()
            .split_once('.')
            .ok_or_else(|| AuthError::InvalidToken("malformed token".to_string()))?;

        if Self::sign(&self.secret()?, payload) != signature {
            return Err(AuthError::InvalidToken("signature mismatch".to_string()));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let claims: TokenClaims =
            serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }

    fn grant(&self, user: &StoredUser) -> AuthResult<AuthGrant> {
        Ok(AuthGrant {
            user: user.record(),
            token: self.issue_token(user)?,
        })
    }
}

fn validate_email(email: &str) -> AuthResult<()> {
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> AuthResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn verify_token(&self, token: &str) -> AuthResult<UserRecord> {
        self.simulate_network().await?;

        let claims = self.decode_token(token).inspect_err(|e| {
            debug!(error = %e, "Token rejected");
        })?;
        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|u| u.id == claims.sub)
            .ok_or(AuthError::UserNotFound)?;

        debug!(user_id = %user.id, "Token verified");
        Ok(user.record())
    }

    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthGrant> {
        self.simulate_network().await?;

        let email = normalize_email(&credentials.email);
        validate_email(&email)?;
        if credentials.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|u| u.email == email && u.password_matches(&credentials.password))
            .ok_or_else(|| {
                warn!(email = %email, "Sign in rejected");
                AuthError::InvalidCredentials(INVALID_CREDENTIALS.to_string())
            })?;

        info!(user_id = %user.id, "Signed in");
        self.grant(user)
    }

    async fn register(&self, registration: &Registration) -> AuthResult<AuthGrant> {
        self.simulate_network().await?;

        let email = normalize_email(&registration.email);
        let name = registration.name.trim();
        validate_email(&email)?;
        validate_password(&registration.password)?;
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken(email));
        }

        let user = StoredUser::new(&email, &registration.password, name);
        users.push(user.clone());
        self.save_users(&users)?;

        info!(user_id = %user.id, "Registered new account");
        self.grant(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_storage::MemoryStorage;

    fn service_over(storage: Arc<dyn KeyValueStorage>) -> MockAuthService {
        MockAuthService::new(storage, Duration::ZERO)
    }

    fn service() -> MockAuthService {
        service_over(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_demo_account_can_sign_in() {
        let auth = service();

        let grant = auth
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();

        assert_eq!(grant.user.email, DEMO_EMAIL);
        assert_eq!(grant.user.name, DEMO_NAME);
        assert!(grant.token.contains('.'));
    }

    #[tokio::test]
    async fn test_email_match_ignores_case_and_whitespace() {
        let auth = service();

        let grant = auth
            .login(&Credentials::new("  Test@Example.com ", DEMO_PASSWORD))
            .await
            .unwrap();

        assert_eq!(grant.user.email, DEMO_EMAIL);
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let auth = service();

        let err = auth
            .login(&Credentials::new(DEMO_EMAIL, "wrong-password"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
        assert_eq!(err.user_message().as_deref(), Some(INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let auth = service();

        let err = auth
            .login(&Credentials::new("nobody@example.com", DEMO_PASSWORD))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_register_then_sign_in() {
        let auth = service();

        let grant = auth
            .register(&Registration::new("ann@example.com", "secret1", "Ann"))
            .await
            .unwrap();
        assert_eq!(grant.user.name, "Ann");

        let again = auth
            .login(&Credentials::new("ann@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(again.user.id, grant.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let auth = service();

        let err = auth
            .register(&Registration::new("TEST@example.com", "secret1", "Dup"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken(ref e) if e == DEMO_EMAIL));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let auth = service();

        let cases = [
            Registration::new("not-an-email", "secret1", "Ann"),
            Registration::new("ann@example.com", "short", "Ann"),
            Registration::new("ann@example.com", "secret1", "   "),
        ];
        for registration in cases {
            let err = auth.register(&registration).await.unwrap_err();
            assert!(
                matches!(err, AuthError::Validation(_)),
                "expected validation error for {:?}, got {:?}",
                registration,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_verify_token_round_trip() {
        let auth = service();
        let grant = auth
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();

        let user = auth.verify_token(&grant.token).await.unwrap();

        assert_eq!(user, grant.user);
    }

    #[tokio::test]
    async fn test_token_survives_new_service_on_same_storage() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let grant = service_over(storage.clone())
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();

        let user = service_over(storage).verify_token(&grant.token).await.unwrap();

        assert_eq!(user.id, grant.user.id);
    }

    #[tokio::test]
    async fn test_token_from_other_profile_is_rejected() {
        let grant = service()
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();

        let err = service().verify_token(&grant.token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_tampered_and_malformed_tokens_are_rejected() {
        let auth = service();
        let grant = auth
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();
        let (_, signature) = grant.token.split_once('.').unwrap();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            br#"{"sub":"someone-else","email":"x@y.z","iat":0,"exp":99999999999}"#,
        );
        let forged = format!("{}.{}", forged_claims, signature);

        assert!(matches!(
            auth.verify_token(&forged).await,
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            auth.verify_token("garbage").await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let auth = service().with_token_ttl(chrono::Duration::seconds(-1));
        let grant = auth
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();

        let err = auth.verify_token(&grant.token).await.unwrap_err();

        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn test_passwords_are_not_stored_in_plain_text() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        service_over(storage.clone())
            .register(&Registration::new("ann@example.com", "secret-pass", "Ann"))
            .await
            .unwrap();

        let table = storage.get(StorageKeys::MOCK_AUTH_USERS).unwrap().unwrap();
        assert!(table.contains("ann@example.com"));
        assert!(!table.contains("secret-pass"));
        assert!(!table.contains(DEMO_PASSWORD));
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_wait_for_configured_latency() {
        let auth = MockAuthService::new(Arc::new(MemoryStorage::new()), Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        auth.login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_outage_fails_every_call_as_transient() {
        let auth = MockAuthService::new(Arc::new(MemoryStorage::new()), Duration::ZERO)
            .with_outage(true);

        let err = auth
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NetworkUnavailable));
        assert!(err.is_transient());
        assert_eq!(err.user_message().as_deref(), Some("Network unavailable"));

        let err = auth
            .register(&Registration::new("ann@example.com", "secret-pass", "Ann"))
            .await
            .unwrap_err();
        assert!(err.is_transient());

        let err = auth.verify_token("anything").await.unwrap_err();
        assert!(err.is_transient());
    }
}
