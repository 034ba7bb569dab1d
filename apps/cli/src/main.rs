//! News Explorer CLI - search news and keep a list of saved articles.

mod commands;
mod context;
mod output;
mod tui;

use clap::{Parser, Subcommand};
use context::AppContext;
use explorer_config_and_utils::DEFAULT_PROFILE;
use std::path::PathBuf;

/// News Explorer - search recent news and keep the articles worth reading.
#[derive(Parser)]
#[command(name = "news-explorer")]
#[command(about = "Search recent news and keep a list of saved articles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Storage profile holding the session and saved articles
    #[arg(long, env = "NEWS_EXPLORER_PROFILE", default_value = DEFAULT_PROFILE, global = true)]
    profile: String,

    /// Base directory for config, profiles and logs
    #[arg(long, env = "NEWS_EXPLORER_HOME", global = true)]
    home: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Use terminal-adaptive colors instead of the built-in theme (only with ui)
    #[arg(long)]
    terminal_colors: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); overrides config.json
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal UI (default)
    Ui,

    /// Search news for a keyword
    Search {
        /// Keyword to search for
        keyword: String,
        /// Print every result instead of the first page
        #[arg(short, long)]
        all: bool,
    },

    /// Sign in with email and password
    Login,

    /// Create an account and sign in
    Register,

    /// Sign out of the current profile
    Logout,

    /// Show session status
    Status,

    /// Manage saved articles
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[derive(Subcommand)]
enum SavedCommands {
    /// List saved articles
    List,
    /// Remove a saved article
    Remove {
        /// URL of the article
        url: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let launches_ui = matches!(cli.command, None | Some(Commands::Ui));

    let ctx = match AppContext::new(cli.home.clone(), &cli.profile, cli.ephemeral) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // The terminal UI owns the screen, so only one-shot commands log to stderr.
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| ctx.config.log_level.clone());
    if let Err(e) = ctx.init_logging(&level, !launches_ui) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        None | Some(Commands::Ui) => {
            let theme_mode = if cli.terminal_colors {
                tui::ThemeMode::Terminal
            } else {
                tui::ThemeMode::Explorer
            };
            tui::run(&ctx, theme_mode).await
        }
        Some(Commands::Search { keyword, all }) => {
            commands::search(&ctx, &keyword, all, &cli.format).await
        }
        Some(Commands::Login) => commands::login(&ctx, &cli.format).await,
        Some(Commands::Register) => commands::register(&ctx, &cli.format).await,
        Some(Commands::Logout) => commands::logout(&ctx, &cli.format).await,
        Some(Commands::Status) => commands::status(&ctx, &cli.format).await,
        Some(Commands::Saved { command }) => match command {
            SavedCommands::List => commands::saved_list(&ctx, &cli.format).await,
            SavedCommands::Remove { url } => commands::saved_remove(&ctx, &url, &cli.format).await,
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
