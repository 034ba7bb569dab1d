//! Output formatting for the CLI.

use clap::ValueEnum;
use explorer_types::ArticleSummary;
use serde::Serialize;
use std::fmt;

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format.
pub fn print<T: Serialize + fmt::Display>(value: &T, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            } else {
                println!("{}", value);
            }
        }
    }
}

/// Print a success message.
pub fn print_success(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => {
            let json = serde_json::json!({ "status": "success", "message": message });
            println!("{}", json);
        }
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => {
            let json = serde_json::json!({ "status": "error", "message": message });
            eprintln!("{}", json);
        }
    }
}

/// Print a table row.
pub fn print_row(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{}:", label), value);
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "-".repeat(50));
}

/// Print a heading.
pub fn print_heading(text: &str) {
    println!("\n{}", text);
    print_divider();
}

/// A list of articles printed as numbered cards, or as a JSON array.
#[derive(Debug, Serialize)]
pub struct ArticleList<'a> {
    pub articles: &'a [ArticleSummary],
    pub total: usize,
    #[serde(skip)]
    pub saved_urls: Vec<String>,
}

impl<'a> ArticleList<'a> {
    pub fn new(articles: &'a [ArticleSummary], total: usize) -> Self {
        Self {
            articles,
            total,
            saved_urls: Vec::new(),
        }
    }

    pub fn with_saved(mut self, urls: Vec<String>) -> Self {
        self.saved_urls = urls;
        self
    }
}

impl fmt::Display for ArticleList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, article) in self.articles.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let marker = if self.saved_urls.contains(&article.url) {
                " [saved]"
            } else {
                ""
            };
            writeln!(f, "{:>2}. {}{}", idx + 1, article.title, marker)?;
            writeln!(f, "    {} | {}", article.source, article.display_date())?;
            if !article.description.is_empty() {
                for line in textwrap::wrap(&article.description, 72) {
                    writeln!(f, "    {}", line)?;
                }
            }
            writeln!(f, "    {}", article.url)?;
        }
        if self.articles.len() < self.total {
            write!(
                f,
                "\nShowing {} of {} (use --all to see everything)",
                self.articles.len(),
                self.total
            )?;
        }
        Ok(())
    }
}
