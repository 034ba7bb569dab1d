//! Session state: the FSM plus the signed-in user.

use crate::session_fsm::{SessionMachine, SessionMachineInput, SessionPhase};
use crate::{OrchestratorError, OrchestratorResult};
use explorer_types::UserRecord;
use serde::Serialize;
use tracing::debug;

/// Read-only view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<UserRecord>,
    pub is_initializing: bool,
}

/// Owns the session FSM. The user is set exactly when the machine enters
/// `Authenticated` and cleared whenever it leaves.
pub struct SessionState {
    machine: SessionMachine,
    user: Option<UserRecord>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            machine: SessionMachine::new(),
            user: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from(self.machine.state())
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase().is_authenticated()
    }

    pub fn is_initializing(&self) -> bool {
        self.phase().is_initializing()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn snapshot(&self) -> Session {
        Session {
            is_authenticated: self.is_authenticated(),
            user: self.user.clone(),
            is_initializing: self.is_initializing(),
        }
    }

    /// Feed one input to the machine.
    pub(crate) fn transition(&mut self, input: SessionMachineInput) -> OrchestratorResult<()> {
        let from = self.phase();
        self.machine.consume(&input).map_err(|_| {
            OrchestratorError::InvalidTransition(format!("{:?} in phase {:?}", input, from))
        })?;
        if !self.phase().is_authenticated() {
            self.user = None;
        }
        debug!(from = ?from, to = ?self.phase(), "Session transition");
        Ok(())
    }

    /// Transition into `Authenticated` with `user`.
    pub(crate) fn authenticate(
        &mut self,
        input: SessionMachineInput,
        user: UserRecord,
    ) -> OrchestratorResult<()> {
        self.transition(input)?;
        if self.is_authenticated() {
            self.user = Some(user);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: "u1".to_string(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_initializing() {
        let session = SessionState::new();
        let snapshot = session.snapshot();

        assert!(snapshot.is_initializing);
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
    }

    #[test]
    fn test_user_follows_authenticated_phase() {
        let mut session = SessionState::new();
        session.transition(SessionMachineInput::TokenFound).unwrap();
        session
            .authenticate(SessionMachineInput::Verified, user())
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("u1"));

        session.transition(SessionMachineInput::SignOut).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_invalid_transition_leaves_state_alone() {
        let mut session = SessionState::new();

        let err = session
            .authenticate(SessionMachineInput::Succeeded, user())
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::InvalidTransition(_)));
        assert_eq!(session.phase(), SessionPhase::Initializing);
        assert!(session.user().is_none());
    }
}
