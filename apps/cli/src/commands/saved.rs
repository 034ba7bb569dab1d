//! Saved article commands.

use super::require_session;
use crate::context::AppContext;
use crate::output::{self, ArticleList, OutputFormat};
use anyhow::Result;

/// "<name>, you have N saved article(s)"
pub(crate) fn saved_heading(name: &str, count: usize) -> String {
    let noun = if count == 1 { "article" } else { "articles" };
    format!("{}, you have {} saved {}", name, count, noun)
}

/// List saved articles for the signed-in profile.
pub async fn saved_list(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let orchestrator = ctx.start().await?;
    require_session(&orchestrator)?;

    let articles = orchestrator.saved_articles();

    if let OutputFormat::Text = format {
        let name = orchestrator
            .current_user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_default();
        output::print_heading(&saved_heading(&name, articles.len()));
        if let Some(line) = orchestrator.saved().keyword_line() {
            println!("{}\n", line);
        }
        if articles.is_empty() {
            println!("Nothing saved yet. Save articles from the search results in the UI.");
            return Ok(());
        }
    }

    output::print(&ArticleList::new(articles, articles.len()), format);
    Ok(())
}

/// Remove one saved article by URL.
pub async fn saved_remove(ctx: &AppContext, url: &str, format: &OutputFormat) -> Result<()> {
    let mut orchestrator = ctx.start().await?;
    require_session(&orchestrator)?;

    let url = url.trim();
    let article = match orchestrator
        .saved_articles()
        .iter()
        .find(|a| a.url == url)
        .cloned()
    {
        Some(article) => article,
        None => {
            output::print_error(&format!("No saved article with URL {}", url), format);
            return Ok(());
        }
    };

    orchestrator.delete_article(&article).await?;
    output::print_success(&format!("Removed \"{}\"", article.title), format);
    Ok(())
}
