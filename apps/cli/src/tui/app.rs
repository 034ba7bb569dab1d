//! Application state for the TUI.
//!
//! Session, search, and saved-article state belong to the orchestrator.
//! `App` only adds what a terminal needs on top: input buffers, selection,
//! focus, and the channel that brings search results back.

use super::theme::{Theme, ThemeMode};
use explorer_auth::{Credentials, Registration};
use explorer_search::{SearchOutcome, SearchResponse};
use explorer_types::ArticleSummary;
use session_article_orchestrator::{ModalVisibility, Orchestrator, Route, SearchTicket};
use tokio::sync::mpsc;
use tracing::debug;

/// Result of a search task, tagged with the ticket it was issued under.
pub struct SearchCompletion {
    pub ticket: SearchTicket,
    pub outcome: SearchOutcome<SearchResponse>,
}

/// Where key presses go on the Home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SearchInput,
    Results,
}

/// One focusable row of an auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Password,
    Name,
    Submit,
    Switch,
}

impl FormField {
    pub fn is_text(self) -> bool {
        matches!(self, FormField::Email | FormField::Password | FormField::Name)
    }
}

const LOGIN_FIELDS: [FormField; 4] = [
    FormField::Email,
    FormField::Password,
    FormField::Submit,
    FormField::Switch,
];

const REGISTER_FIELDS: [FormField; 5] = [
    FormField::Email,
    FormField::Password,
    FormField::Name,
    FormField::Submit,
    FormField::Switch,
];

/// Input buffers shared by the login and register modals.
#[derive(Debug, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub focused: usize,
}

impl AuthForm {
    pub fn fields(modal: ModalVisibility) -> &'static [FormField] {
        match modal {
            ModalVisibility::Register => &REGISTER_FIELDS,
            _ => &LOGIN_FIELDS,
        }
    }

    pub fn focused_field(&self, modal: ModalVisibility) -> FormField {
        let fields = Self::fields(modal);
        fields[self.focused.min(fields.len() - 1)]
    }

    pub fn next(&mut self, modal: ModalVisibility) {
        self.focused = (self.focused + 1) % Self::fields(modal).len();
    }

    pub fn prev(&mut self, modal: ModalVisibility) {
        let len = Self::fields(modal).len();
        self.focused = (self.focused + len - 1) % len;
    }

    pub fn buffer_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::Name => Some(&mut self.name),
            FormField::Submit | FormField::Switch => None,
        }
    }

    /// Submit is only enabled once every field of the form has content.
    pub fn is_complete(&self, modal: ModalVisibility) -> bool {
        let filled = !self.email.trim().is_empty() && !self.password.is_empty();
        match modal {
            ModalVisibility::Register => filled && !self.name.trim().is_empty(),
            _ => filled,
        }
    }

    /// Clear the password; the email is kept so a retry is one field away.
    pub fn clear_secret(&mut self) {
        self.password.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Main application state.
pub struct App {
    pub orchestrator: Orchestrator,
    pub theme: Theme,

    // Navigation
    pub requested_route: Route,
    pub focus: Focus,

    // Home
    pub search_input: String,
    pub selected_result: usize,

    // Saved news
    pub selected_saved: usize,

    // Modals
    pub form: AuthForm,

    // Status
    pub status_message: Option<String>,
    pub spinner_frame: usize,

    // Search tasks report back here
    search_sender: mpsc::Sender<SearchCompletion>,
    pub search_results: mpsc::Receiver<SearchCompletion>,
}

impl App {
    pub fn new(orchestrator: Orchestrator, theme_mode: ThemeMode) -> Self {
        let (search_sender, search_results) = mpsc::channel(16);
        Self {
            orchestrator,
            theme: Theme::from_mode(theme_mode),
            requested_route: Route::Home,
            focus: Focus::SearchInput,
            search_input: String::new(),
            selected_result: 0,
            selected_saved: 0,
            form: AuthForm::default(),
            status_message: None,
            spinner_frame: 0,
            search_sender,
            search_results,
        }
    }

    /// The page actually shown, after the session guard.
    pub fn route(&self) -> Route {
        self.orchestrator.resolve_route(self.requested_route)
    }

    /// Move to `route`. A refused route is replaced by where the guard sent
    /// the user, so signing in later does not replay it.
    pub fn navigate(&mut self, route: Route) {
        self.requested_route = self.orchestrator.resolve_route(route);
        if self.requested_route != route {
            self.set_status_message("Sign in to see your saved articles".to_string());
        }
        self.clamp_selection();
    }

    // ==========================================
    // Search
    // ==========================================

    /// Start a search for the current input. The request runs on a task and
    /// its result comes back through `search_results`.
    pub fn start_search(&mut self) {
        let ticket = match self.orchestrator.begin_search(&self.search_input) {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!(error = %e, "Search not started");
                return;
            }
        };

        self.selected_result = 0;
        self.focus = Focus::Results;

        let service = self.orchestrator.search_service();
        let sender = self.search_sender.clone();
        tokio::spawn(async move {
            let outcome = service.search_news(&ticket.keyword).await;
            if sender.send(SearchCompletion { ticket, outcome }).await.is_err() {
                debug!("Search finished after the UI closed");
            }
        });
    }

    pub fn apply_search_completion(&mut self, completion: SearchCompletion) {
        if self
            .orchestrator
            .apply_search_outcome(&completion.ticket, completion.outcome)
        {
            self.clamp_selection();
        }
    }

    pub fn show_more(&mut self) {
        if self.orchestrator.can_show_more() {
            let previous = self.orchestrator.visible_articles().len();
            self.orchestrator.show_more();
            // Land on the first newly revealed card.
            self.selected_result = previous;
            self.clamp_selection();
        }
    }

    pub fn selected_result_article(&self) -> Option<&ArticleSummary> {
        self.orchestrator.visible_articles().get(self.selected_result)
    }

    pub fn selected_saved_article(&self) -> Option<&ArticleSummary> {
        self.orchestrator.saved_articles().get(self.selected_saved)
    }

    // ==========================================
    // Saved articles
    // ==========================================

    /// Save or unsave the selected result. Anonymous users get the login modal.
    pub async fn toggle_selected_saved(&mut self) {
        if !self.orchestrator.is_authenticated() {
            self.open_login();
            return;
        }
        let Some(article) = self.selected_result_article().cloned() else {
            return;
        };
        match self.orchestrator.toggle_saved(&article).await {
            Ok(true) => self.set_status_message(format!("Saved \"{}\"", article.title)),
            Ok(false) => self.set_status_message(format!("Removed \"{}\"", article.title)),
            // The orchestrator raised a notice.
            Err(e) => debug!(error = %e, "Toggle saved failed"),
        }
    }

    pub async fn delete_selected_saved(&mut self) {
        let Some(article) = self.selected_saved_article().cloned() else {
            return;
        };
        if self.orchestrator.delete_article(&article).await.is_ok() {
            self.set_status_message(format!("Removed \"{}\"", article.title));
        }
        self.clamp_selection();
    }

    // ==========================================
    // Modals and session
    // ==========================================

    pub fn open_login(&mut self) {
        self.orchestrator.open_login();
        self.form.focused = 0;
    }

    pub fn open_register(&mut self) {
        self.orchestrator.open_register();
        self.form.focused = 0;
    }

    pub fn close_modals(&mut self) {
        self.orchestrator.close_modals();
        self.form.reset();
    }

    /// Switch between the login and register modals.
    pub fn switch_modal(&mut self) {
        match self.orchestrator.modal() {
            ModalVisibility::Login => self.open_register(),
            ModalVisibility::Register => self.open_login(),
            ModalVisibility::None => {}
        }
    }

    /// Submit the open form. Returns whether the session is now signed in.
    pub async fn submit_form(&mut self) -> bool {
        let modal = self.orchestrator.modal();
        if !self.form.is_complete(modal) {
            self.set_status_message("Fill in every field first".to_string());
            return false;
        }

        let result = match modal {
            ModalVisibility::Login => {
                let credentials =
                    Credentials::new(self.form.email.trim(), self.form.password.clone());
                self.orchestrator.sign_in(&credentials).await
            }
            ModalVisibility::Register => {
                let registration = Registration::new(
                    self.form.email.trim(),
                    self.form.password.clone(),
                    self.form.name.trim(),
                );
                self.orchestrator.sign_up(&registration).await
            }
            ModalVisibility::None => return false,
        };

        match result {
            Ok(()) => {
                self.form.reset();
                if let Some(user) = self.orchestrator.current_user() {
                    let message = format!("Signed in as {}", user.display_name());
                    self.set_status_message(message);
                }
                true
            }
            Err(e) => {
                debug!(error = %e, "Auth form rejected");
                self.form.clear_secret();
                false
            }
        }
    }

    pub async fn sign_out(&mut self) {
        if !self.orchestrator.is_authenticated() {
            return;
        }
        self.orchestrator.sign_out().await;
        self.requested_route = Route::Home;
        self.selected_saved = 0;
        self.set_status_message("Signed out".to_string());
    }

    // ==========================================
    // Selection
    // ==========================================

    pub fn select_next(&mut self) {
        match self.route() {
            Route::Home => {
                let len = self.orchestrator.visible_articles().len();
                if self.selected_result + 1 < len {
                    self.selected_result += 1;
                }
            }
            Route::SavedNews => {
                let len = self.orchestrator.saved_articles().len();
                if self.selected_saved + 1 < len {
                    self.selected_saved += 1;
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.route() {
            Route::Home => self.selected_result = self.selected_result.saturating_sub(1),
            Route::SavedNews => self.selected_saved = self.selected_saved.saturating_sub(1),
        }
    }

    /// Keep selections inside their lists after the lists change.
    pub fn clamp_selection(&mut self) {
        let results = self.orchestrator.visible_articles().len();
        self.selected_result = self.selected_result.min(results.saturating_sub(1));
        let saved = self.orchestrator.saved_articles().len();
        self.selected_saved = self.selected_saved.min(saved.saturating_sub(1));
    }

    // ==========================================
    // Status line
    // ==========================================

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Get the current spinner character for loading animation.
    pub fn spinner_char(&self) -> char {
        const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}
