//! TUI components.

pub mod about;
pub mod auth_modal;
pub mod footer;
pub mod header;
pub mod notice;
pub mod results;
pub mod saved_news;
pub mod search_panel;
