//! Session and article orchestration for News Explorer.
//!
//! [`Orchestrator`] is the single source of truth for:
//! - the auth session (an explicit FSM, see [`session_fsm`])
//! - search results and pagination, with stale responses suppressed by
//!   [`SearchTicket`]
//! - the saved-article set, mirrored from the persistent store
//! - modal visibility, the pending notice, and the route guard
//!
//! Shells read state through `&Orchestrator` and call its handlers; they hold
//! no state of their own beyond input buffers.

mod error;
mod modal;
mod notice;
mod orchestrator;
mod route;
mod saved;
mod search;
mod session;
pub mod session_fsm;

#[cfg(test)]
mod tests;

pub use error::{OrchestratorError, OrchestratorResult, ValidationError};
pub use modal::ModalVisibility;
pub use notice::{Notice, NoticeKind, SIGN_IN_FAILED, SIGN_UP_FAILED};
pub use orchestrator::Orchestrator;
pub use route::{resolve_route, Route};
pub use saved::SavedArticleSet;
pub use search::{
    SearchCondition, SearchState, SearchTicket, INITIAL_PAGE_SIZE, NOTHING_FOUND, SEARCH_FAILED,
    SHOW_MORE_INCREMENT,
};
pub use session::{Session, SessionState};
pub use session_fsm::SessionPhase;
