//! One-shot news search.

use crate::context::AppContext;
use crate::output::{self, ArticleList, OutputFormat};
use anyhow::Result;
use session_article_orchestrator::SearchCondition;

/// Search news for `keyword` and print the first page, or everything with `all`.
pub async fn search(ctx: &AppContext, keyword: &str, all: bool, format: &OutputFormat) -> Result<()> {
    let mut orchestrator = ctx.start().await?;

    orchestrator.search(keyword).await;

    let state = orchestrator.search_state();
    match state.condition() {
        Some(SearchCondition::NoResults) => {
            output::print_success(SearchCondition::NoResults.message(), format);
            return Ok(());
        }
        Some(condition) => anyhow::bail!(condition.message()),
        None => {}
    }

    let shown = if all {
        state.articles()
    } else {
        orchestrator.visible_articles()
    };
    let saved = orchestrator
        .saved_articles()
        .iter()
        .map(|a| a.url.clone())
        .collect();

    if let OutputFormat::Text = format {
        output::print_heading(&format!(
            "{} results for \"{}\"",
            state.articles().len(),
            state.keyword()
        ));
    }
    output::print(
        &ArticleList::new(shown, state.articles().len()).with_saved(saved),
        format,
    );
    Ok(())
}
