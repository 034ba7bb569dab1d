//! Session state machine using rust-fsm.
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────────────┐  TokenMissing   ┌─────────────────┐
//! │  Initializing   │ ──────────────► │    Anonymous    │ ◄─────────────┐
//! └────────┬────────┘                 └────────┬────────┘               │
//!          │ TokenFound                        │ SignInAttempt          │
//!          ▼                                   │ SignUpAttempt          │
//! ┌─────────────────┐   Rejected               ▼                        │
//! │    Verifying    │ ──────────► Anonymous ┌─────────────────┐ Failed  │
//! └────────┬────────┘                       │    SigningIn    │ ────────┤
//!          │ Verified                       └────────┬────────┘         │
//!          ▼                                         │ Succeeded        │
//! ┌─────────────────┐ ◄──────────────────────────────┘                  │
//! │  Authenticated  │ ──────────────── SignOut ─────────────────────────┘
//! └─────────────────┘
//! ```

use rust_fsm::*;
use serde::Serialize;

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub session_machine(Initializing)

    Initializing => {
        TokenMissing => Anonymous,
        TokenFound => Verifying
    },
    Verifying => {
        Verified => Authenticated,
        Rejected => Anonymous
    },
    Anonymous => {
        SignInAttempt => SigningIn,
        SignUpAttempt => SigningIn
    },
    SigningIn => {
        Succeeded => Authenticated,
        Failed => Anonymous
    },
    Authenticated => {
        SignOut => Anonymous
    }
}

pub use session_machine::Input as SessionMachineInput;
pub use session_machine::State as SessionMachineState;
pub use session_machine::StateMachine as SessionMachine;

/// Session phase for the shell and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Startup, before the stored token has been looked at.
    Initializing,
    /// Startup, waiting on token verification.
    Verifying,
    Anonymous,
    /// A sign-in or sign-up call is in flight.
    SigningIn,
    Authenticated,
}

impl SessionPhase {
    /// True only during the startup resolution window.
    pub fn is_initializing(&self) -> bool {
        matches!(self, SessionPhase::Initializing | SessionPhase::Verifying)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated)
    }
}

impl From<&SessionMachineState> for SessionPhase {
    fn from(state: &SessionMachineState) -> Self {
        match state {
            SessionMachineState::Initializing => SessionPhase::Initializing,
            SessionMachineState::Verifying => SessionPhase::Verifying,
            SessionMachineState::Anonymous => SessionPhase::Anonymous,
            SessionMachineState::SigningIn => SessionPhase::SigningIn,
            SessionMachineState::Authenticated => SessionPhase::Authenticated,
        }
    }
}
