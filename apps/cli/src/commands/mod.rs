//! CLI command implementations.

mod auth;
mod saved;
mod search;

pub use auth::{login, logout, register, status};
pub use saved::{saved_list, saved_remove};
pub(crate) use saved::saved_heading;
pub use search::search;

use anyhow::Result;
use session_article_orchestrator::{Orchestrator, Route};
use std::io::{self, Write};

/// Read one trimmed line from stdin after printing `label`.
fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Refuse commands that need a signed-in session, like the saved-news page.
fn require_session(orchestrator: &Orchestrator) -> Result<()> {
    if orchestrator.resolve_route(Route::SavedNews) != Route::SavedNews {
        anyhow::bail!("Not signed in. Run 'news-explorer login' first");
    }
    Ok(())
}
