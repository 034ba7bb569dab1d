//! The single owner of application state.

use crate::notice::{
    Notice, DELETE_FAILED, LOAD_SAVED_FAILED, REMEMBER_SESSION_FAILED, SAVE_FAILED,
    SIGN_IN_FAILED, SIGN_UP_FAILED,
};
use crate::route::resolve_route;
use crate::session_fsm::{SessionMachineInput, SessionPhase};
use crate::{
    ModalVisibility, OrchestratorError, OrchestratorResult, Route, SavedArticleSet, SearchState,
    SearchTicket, Session, SessionState, ValidationError,
};
use explorer_auth::{AuthError, AuthGrant, AuthService, Credentials, Registration};
use explorer_search::{SearchOutcome, SearchResponse, SearchService};
use explorer_storage::{PersistentStore, StorageError};
use explorer_types::{ArticleSummary, UserRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which auth flow a sign-in attempt came from.
#[derive(Debug, Clone, Copy)]
enum AuthFlow {
    SignIn,
    SignUp,
}

impl AuthFlow {
    fn attempt(self) -> SessionMachineInput {
        match self {
            AuthFlow::SignIn => SessionMachineInput::SignInAttempt,
            AuthFlow::SignUp => SessionMachineInput::SignUpAttempt,
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            AuthFlow::SignIn => SIGN_IN_FAILED,
            AuthFlow::SignUp => SIGN_UP_FAILED,
        }
    }

    fn modal(self) -> ModalVisibility {
        match self {
            AuthFlow::SignIn => ModalVisibility::Login,
            AuthFlow::SignUp => ModalVisibility::Register,
        }
    }
}

/// Session, search, saved articles, and modal state, plus the collaborators
/// that feed them.
///
/// Every handler takes `&mut self` and applies its state changes after its
/// last await point.
pub struct Orchestrator {
    store: Arc<dyn PersistentStore>,
    auth_service: Arc<dyn AuthService>,
    search_service: Arc<dyn SearchService>,
    session: SessionState,
    search: SearchState,
    saved: SavedArticleSet,
    modal: ModalVisibility,
    notice: Option<Notice>,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn PersistentStore>,
        auth_service: Arc<dyn AuthService>,
        search_service: Arc<dyn SearchService>,
    ) -> Self {
        Self {
            store,
            auth_service,
            search_service,
            session: SessionState::new(),
            search: SearchState::new(),
            saved: SavedArticleSet::new(),
            modal: ModalVisibility::None,
            notice: None,
        }
    }

    // ==========================================
    // Session
    // ==========================================

    pub fn session(&self) -> Session {
        self.session.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_initializing(&self) -> bool {
        self.session.is_initializing()
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.session.user()
    }

    /// Resolve the stored token into a session. Runs once; later calls are
    /// no-ops.
    pub async fn initialize(&mut self) {
        if self.session.phase() != SessionPhase::Initializing {
            debug!(phase = ?self.session.phase(), "Session already initialized");
            return;
        }

        let token = match self.store.get_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read stored token, starting signed out");
                None
            }
        };

        let Some(token) = token else {
            self.advance(SessionMachineInput::TokenMissing);
            info!("No stored session");
            return;
        };

        self.advance(SessionMachineInput::TokenFound);
        match self.auth_service.verify_token(&token).await {
            Ok(user) => {
                let saved = self.store.get_saved_articles().await;
                info!(user_id = %user.id, "Restored session");
                if let Err(e) = self.session.authenticate(SessionMachineInput::Verified, user) {
                    warn!(error = %e, "Unexpected session state while restoring");
                }
                self.apply_loaded_saved(saved);
            }
            Err(e) if e.is_transient() => {
                // Token may still be good; keep it for the next start.
                warn!(error = %e, "Could not verify stored token, starting signed out");
                self.advance(SessionMachineInput::Rejected);
            }
            Err(e) => {
                let removed = self.store.remove_token().await;
                info!(error = %e, "Stored token rejected, signing out");
                if let Err(se) = removed {
                    warn!(error = %se, "Could not remove rejected token");
                }
                self.advance(SessionMachineInput::Rejected);
            }
        }
    }

    pub async fn sign_in(&mut self, credentials: &Credentials) -> OrchestratorResult<()> {
        self.session.transition(AuthFlow::SignIn.attempt())?;
        let result = self.auth_service.login(credentials).await;
        self.finish_auth(AuthFlow::SignIn, result).await
    }

    pub async fn sign_up(&mut self, registration: &Registration) -> OrchestratorResult<()> {
        self.session.transition(AuthFlow::SignUp.attempt())?;
        let result = self.auth_service.register(registration).await;
        self.finish_auth(AuthFlow::SignUp, result).await
    }

    async fn finish_auth(
        &mut self,
        flow: AuthFlow,
        result: Result<AuthGrant, AuthError>,
    ) -> OrchestratorResult<()> {
        let grant = match result {
            Ok(grant) => grant,
            Err(err) => {
                warn!(flow = ?flow, error = %err, transient = err.is_transient(), "Authentication failed");
                self.advance(SessionMachineInput::Failed);
                let message = err
                    .user_message()
                    .unwrap_or_else(|| flow.fallback_message().to_string());
                self.notice = Some(Notice::auth(message));
                return Err(err.into());
            }
        };

        let stored = self.store.set_token(&grant.token).await;
        let saved = self.store.get_saved_articles().await;

        info!(flow = ?flow, user_id = %grant.user.id, "Signed in");
        self.session
            .authenticate(SessionMachineInput::Succeeded, grant.user)?;
        if let Err(e) = stored {
            warn!(error = %e, "Could not persist session token");
            self.notice = Some(Notice::storage(REMEMBER_SESSION_FAILED));
        }
        self.apply_loaded_saved(saved);
        if self.modal == flow.modal() {
            self.modal = ModalVisibility::None;
        }
        Ok(())
    }

    /// Sign out. Never fails; the stored saved-article list is kept for the
    /// next sign-in on this profile.
    pub async fn sign_out(&mut self) {
        let removed = self.store.remove_token().await;

        if let Err(e) = removed {
            warn!(error = %e, "Could not remove stored token during sign out");
        }
        if self.session.is_authenticated() {
            self.advance(SessionMachineInput::SignOut);
        } else {
            debug!(phase = ?self.session.phase(), "Sign out while not signed in");
        }
        self.saved.clear();
        info!("Signed out");
    }

    fn advance(&mut self, input: SessionMachineInput) {
        if let Err(e) = self.session.transition(input) {
            warn!(error = %e, "Ignoring session input");
        }
    }

    fn apply_loaded_saved(&mut self, loaded: Result<Vec<ArticleSummary>, StorageError>) {
        match loaded {
            Ok(articles) => {
                debug!(count = articles.len(), "Loaded saved articles");
                self.saved.replace(articles);
            }
            Err(e) => {
                warn!(error = %e, "Could not load saved articles");
                self.saved.clear();
                self.notice = Some(Notice::storage(LOAD_SAVED_FAILED));
            }
        }
    }

    // ==========================================
    // Search
    // ==========================================

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// The search backend, for callers that run the request themselves and
    /// report back through [`Orchestrator::apply_search_outcome`].
    pub fn search_service(&self) -> Arc<dyn SearchService> {
        Arc::clone(&self.search_service)
    }

    pub fn begin_search(&mut self, keyword: &str) -> Result<SearchTicket, ValidationError> {
        self.search.begin(keyword)
    }

    /// Returns false when `ticket` was superseded and the outcome discarded.
    pub fn apply_search_outcome(
        &mut self,
        ticket: &SearchTicket,
        outcome: SearchOutcome<SearchResponse>,
    ) -> bool {
        self.search.apply(ticket, outcome)
    }

    /// Validate, run, and apply one search inline.
    pub async fn search(&mut self, keyword: &str) {
        let Ok(ticket) = self.begin_search(keyword) else {
            return;
        };
        let outcome = self.search_service.search_news(&ticket.keyword).await;
        self.apply_search_outcome(&ticket, outcome);
    }

    pub fn show_more(&mut self) {
        self.search.show_more();
    }

    pub fn visible_articles(&self) -> &[ArticleSummary] {
        self.search.visible_articles()
    }

    pub fn can_show_more(&self) -> bool {
        self.search.can_show_more()
    }

    // ==========================================
    // Saved articles
    // ==========================================

    pub fn saved(&self) -> &SavedArticleSet {
        &self.saved
    }

    pub fn saved_articles(&self) -> &[ArticleSummary] {
        self.saved.articles()
    }

    pub fn is_saved(&self, url: &str) -> bool {
        self.saved.contains(url)
    }

    pub fn saved_keywords(&self) -> Vec<String> {
        self.saved.keywords()
    }

    pub async fn save_article(&mut self, article: &ArticleSummary) -> OrchestratorResult<()> {
        let result = self.store.add_saved_article(article).await;
        self.mirror_saved(result, SAVE_FAILED)
    }

    /// Remove by URL. Deleting an article that was never saved is a no-op.
    pub async fn delete_article(&mut self, article: &ArticleSummary) -> OrchestratorResult<()> {
        let result = self.store.remove_saved_article(&article.url).await;
        self.mirror_saved(result, DELETE_FAILED)
    }

    /// Save when not saved, delete otherwise. Returns whether the article is
    /// saved afterwards.
    pub async fn toggle_saved(&mut self, article: &ArticleSummary) -> OrchestratorResult<bool> {
        if self.is_saved(&article.url) {
            self.delete_article(article).await?;
        } else {
            self.save_article(article).await?;
        }
        Ok(self.is_saved(&article.url))
    }

    fn mirror_saved(
        &mut self,
        result: Result<Vec<ArticleSummary>, StorageError>,
        failure_message: &str,
    ) -> OrchestratorResult<()> {
        match result {
            Ok(articles) => {
                debug!(count = articles.len(), "Saved articles updated");
                self.saved.replace(articles);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Saved article update failed");
                self.notice = Some(Notice::storage(failure_message));
                Err(OrchestratorError::Storage(e))
            }
        }
    }

    // ==========================================
    // Modals, notices, routes
    // ==========================================

    pub fn modal(&self) -> ModalVisibility {
        self.modal
    }

    pub fn open_login(&mut self) {
        self.modal = ModalVisibility::Login;
    }

    pub fn open_register(&mut self) {
        self.modal = ModalVisibility::Register;
    }

    pub fn close_modals(&mut self) {
        self.modal = ModalVisibility::None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn resolve_route(&self, requested: Route) -> Route {
        resolve_route(requested, self.session.is_authenticated())
    }
}
