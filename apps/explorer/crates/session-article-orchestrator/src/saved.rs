//! In-memory mirror of the stored saved-article list.

use explorer_types::ArticleSummary;
use std::collections::HashMap;

/// Saved articles as last reported by the store.
#[derive(Debug, Default, Clone)]
pub struct SavedArticleSet {
    articles: Vec<ArticleSummary>,
}

impl SavedArticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[ArticleSummary] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.articles.iter().any(|a| a.url == url)
    }

    pub(crate) fn replace(&mut self, articles: Vec<ArticleSummary>) {
        self.articles = articles;
    }

    pub(crate) fn clear(&mut self) {
        self.articles.clear();
    }

    /// Distinct keywords, most frequent first; ties keep first appearance.
    pub fn keywords(&self) -> Vec<String> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (index, article) in self.articles.iter().enumerate() {
            let keyword = article.keyword.trim();
            if keyword.is_empty() {
                continue;
            }
            counts.entry(keyword).or_insert((0, index)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(keyword, (count, first))| (keyword, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.into_iter().map(|(k, _, _)| k.to_string()).collect()
    }

    /// "By keywords: ..." header line, or `None` when nothing is saved.
    pub fn keyword_line(&self) -> Option<String> {
        let keywords = self.keywords();
        let listed = match keywords.as_slice() {
            [] => return None,
            [one] => one.clone(),
            [a, b] => format!("{} and {}", a, b),
            [a, b, c] => format!("{}, {}, and {}", a, b, c),
            [a, b, rest @ ..] => format!("{}, {}, and {} others", a, b, rest.len()),
        };
        Some(format!("By keywords: {}", listed))
    }
}
