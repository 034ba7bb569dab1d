//! Scenario tests for the orchestrator.
//!
//! - `harness.rs` - Scripted auth and search services, flaky store, wiring
//! - `session.rs` - Startup resolution, sign in, sign up, sign out
//! - `search.rs`  - Validation, pagination, empty and failed searches,
//!   stale results
//! - `saved.rs`   - Save/delete reconciliation with the store
//! - `modal.rs`   - Modal exclusivity, notices, and the route guard

pub(crate) mod harness;
mod modal;
mod search;
