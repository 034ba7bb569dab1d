//! Test harness for orchestrator scenarios.
//!
//! Provides:
//! - ScriptedAuth: an auth service with scripted answers and call counters
//! - ScriptedSearch: a search service answering from a keyword table
//! - FlakyStore: the real ProfileStore over MemoryStorage with switchable
//!   read and write failures
//! - TestHarness: wires the three into an Orchestrator

use crate::Orchestrator;
use async_trait::async_trait;
use explorer_auth::{AuthError, AuthGrant, AuthResult, AuthService, Credentials, Registration};
use explorer_search::{SearchError, SearchOutcome, SearchResponse, SearchService};
use explorer_storage::{
    KeyValueStorage, MemoryStorage, PersistentStore, ProfileStore, StorageError, StorageResult,
};
use explorer_types::{ArticleSummary, UserRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const VALID_TOKEN: &str = "valid-token";

pub fn user(name: &str) -> UserRecord {
    UserRecord {
        id: format!("id-{}", name.to_lowercase()),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub fn article(n: usize, keyword: &str) -> ArticleSummary {
    ArticleSummary {
        url: format!("https://news.example.com/{}/{}", keyword, n),
        title: format!("{} story {}", keyword, n),
        description: format!("Description {}", n),
        source: "Example Times".to_string(),
        published_at: "2024-01-05T10:30:00Z".to_string(),
        image_url: None,
        keyword: keyword.to_string(),
    }
}

pub fn articles(count: usize, keyword: &str) -> Vec<ArticleSummary> {
    (0..count).map(|n| article(n, keyword)).collect()
}

// ==========================================
// Auth
// ==========================================

/// Scripted failure for login/register.
#[derive(Debug, Clone)]
pub enum AuthFailure {
    /// Service error carrying a message for the user.
    Message(String),
    /// Internal error with nothing to show.
    Internal,
}

impl AuthFailure {
    fn into_error(self) -> AuthError {
        match self {
            AuthFailure::Message(m) => AuthError::InvalidCredentials(m),
            AuthFailure::Internal => AuthError::UserNotFound,
        }
    }
}

pub struct ScriptedAuth {
    tokens: Mutex<HashMap<String, UserRecord>>,
    login: Mutex<Result<AuthGrant, AuthFailure>>,
    register: Mutex<Result<AuthGrant, AuthFailure>>,
    offline: AtomicBool,
    pub verify_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
}

impl ScriptedAuth {
    pub fn new() -> Self {
        let ann = user("Ann");
        Self {
            tokens: Mutex::new(HashMap::from([(VALID_TOKEN.to_string(), ann.clone())])),
            login: Mutex::new(Ok(AuthGrant {
                user: ann,
                token: VALID_TOKEN.to_string(),
            })),
            register: Mutex::new(Ok(AuthGrant {
                user: user("Bob"),
                token: "bob-token".to_string(),
            })),
            offline: AtomicBool::new(false),
            verify_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_login(&self, failure: AuthFailure) {
        *self.login.lock().unwrap() = Err(failure);
    }

    pub fn allow_login(&self) {
        *self.login.lock().unwrap() = Ok(AuthGrant {
            user: user("Ann"),
            token: VALID_TOKEN.to_string(),
        });
    }

    pub fn fail_register(&self, failure: AuthFailure) {
        *self.register.lock().unwrap() = Err(failure);
    }

    /// Every call fails with `NetworkUnavailable` while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_network(&self) -> AuthResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::NetworkUnavailable);
        }
        Ok(())
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn login_count(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthService for ScriptedAuth {
    async fn verify_token(&self, token: &str) -> AuthResult<UserRecord> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }

    async fn login(&self, _credentials: &Credentials) -> AuthResult<AuthGrant> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;
        self.login.lock().unwrap().clone().map_err(AuthFailure::into_error)
    }

    async fn register(&self, _registration: &Registration) -> AuthResult<AuthGrant> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;
        self.register
            .lock()
            .unwrap()
            .clone()
            .map_err(AuthFailure::into_error)
    }
}

// ==========================================
// Search
// ==========================================

pub struct ScriptedSearch {
    results: Mutex<HashMap<String, Vec<ArticleSummary>>>,
    failing: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            failing: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer `keyword` with `count` generated articles.
    pub fn with_results(&self, keyword: &str, count: usize) {
        self.results
            .lock()
            .unwrap()
            .insert(keyword.to_string(), articles(count, keyword));
    }

    pub fn fail_for(&self, keyword: &str) {
        self.failing.lock().unwrap().push(keyword.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchService for ScriptedSearch {
    async fn search_news(&self, keyword: &str) -> SearchOutcome<SearchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().iter().any(|k| k == keyword) {
            return Err(SearchError::Api {
                code: "unexpectedError".to_string(),
                message: "connection reset".to_string(),
                status: None,
            });
        }
        let articles = self
            .results
            .lock()
            .unwrap()
            .get(keyword)
            .cloned()
            .unwrap_or_default();
        Ok(SearchResponse { articles })
    }
}

// ==========================================
// Store
// ==========================================

pub struct FlakyStore {
    inner: ProfileStore,
    backend: Arc<MemoryStorage>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        let backend = Arc::new(MemoryStorage::new());
        Self {
            inner: ProfileStore::new(backend.clone()),
            backend,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn profile(&self) -> &ProfileStore {
        &self.inner
    }

    pub fn backend(&self) -> &MemoryStorage {
        &self.backend
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> StorageResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read failed".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("disk full".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistentStore for FlakyStore {
    async fn get_token(&self) -> StorageResult<Option<String>> {
        self.check_read()?;
        self.inner.get_token().await
    }

    async fn set_token(&self, token: &str) -> StorageResult<()> {
        self.check_write()?;
        self.inner.set_token(token).await
    }

    async fn remove_token(&self) -> StorageResult<()> {
        self.check_write()?;
        self.inner.remove_token().await
    }

    async fn get_saved_articles(&self) -> StorageResult<Vec<ArticleSummary>> {
        self.check_read()?;
        self.inner.get_saved_articles().await
    }

    async fn add_saved_article(&self, article: &ArticleSummary) -> StorageResult<Vec<ArticleSummary>> {
        self.check_write()?;
        self.inner.add_saved_article(article).await
    }

    async fn remove_saved_article(&self, url: &str) -> StorageResult<Vec<ArticleSummary>> {
        self.check_write()?;
        self.inner.remove_saved_article(url).await
    }
}

// ==========================================
// Harness
// ==========================================

pub struct TestHarness {
    pub store: Arc<FlakyStore>,
    pub auth: Arc<ScriptedAuth>,
    pub search: Arc<ScriptedSearch>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(FlakyStore::new()),
            auth: Arc::new(ScriptedAuth::new()),
            search: Arc::new(ScriptedSearch::new()),
        }
    }

    /// A fresh orchestrator over the shared collaborators, like a restart.
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.store.clone(), self.auth.clone(), self.search.clone())
    }

    /// Orchestrator that has finished startup with no stored token.
    pub async fn anonymous(&self) -> Orchestrator {
        let mut orchestrator = self.orchestrator();
        orchestrator.initialize().await;
        orchestrator
    }

    /// Orchestrator signed in as the scripted login user.
    pub async fn signed_in(&self) -> Orchestrator {
        let mut orchestrator = self.anonymous().await;
        orchestrator
            .sign_in(&Credentials::new("ann@example.com", "password123"))
            .await
            .unwrap();
        orchestrator
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store.profile().token().unwrap()
    }

    pub fn store_token(&self, token: &str) {
        self.store.profile().store_token(token).unwrap();
    }

    pub fn stored_saved(&self) -> Vec<ArticleSummary> {
        self.store.profile().saved_articles().unwrap()
    }

    pub fn stored_urls(&self) -> Vec<String> {
        self.stored_saved().into_iter().map(|a| a.url).collect()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.store.backend().has(key).unwrap()
    }
}
