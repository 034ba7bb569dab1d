//! Session commands.

use super::prompt_line;
use crate::context::AppContext;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use explorer_auth::{Credentials, Registration};
use session_article_orchestrator::Orchestrator;

/// Message for a failed sign-in or sign-up, preferring the orchestrator's notice.
fn failure_message(orchestrator: &Orchestrator, fallback: &str) -> String {
    orchestrator
        .notice()
        .map(|notice| notice.message.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// Sign in with email and password.
pub async fn login(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let mut orchestrator = ctx.start().await?;

    if let Some(user) = orchestrator.current_user() {
        output::print_success(&format!("Already signed in as {}", user.email), format);
        return Ok(());
    }

    let email = prompt_line("Email: ")?;
    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    // Prompt for password (hidden)
    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    println!("Signing in...");

    match orchestrator.sign_in(&Credentials::new(email, password)).await {
        Ok(()) => {
            let name = orchestrator
                .current_user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| "user".to_string());
            output::print_success(&format!("Signed in as {}", name), format);
            if let Some(notice) = orchestrator.notice() {
                output::print_error(&notice.message, format);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Sign in failed");
            let message = failure_message(&orchestrator, &e.to_string());
            output::print_error(&message, format);
        }
    }

    Ok(())
}

/// Create an account and sign in.
pub async fn register(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let mut orchestrator = ctx.start().await?;

    if let Some(user) = orchestrator.current_user() {
        output::print_success(
            &format!("Already signed in as {}. Sign out first.", user.email),
            format,
        );
        return Ok(());
    }

    let name = prompt_line("Name: ")?;
    let email = prompt_line("Email: ")?;
    let password = rpassword::prompt_password("Password: ")?;

    println!("Creating account...");

    match orchestrator
        .sign_up(&Registration::new(email, password, name))
        .await
    {
        Ok(()) => {
            let name = orchestrator
                .current_user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| "user".to_string());
            output::print_success(&format!("Account created. Signed in as {}", name), format);
            if let Some(notice) = orchestrator.notice() {
                output::print_error(&notice.message, format);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Sign up failed");
            let message = failure_message(&orchestrator, &e.to_string());
            output::print_error(&message, format);
        }
    }

    Ok(())
}

/// Sign out of the current profile. Saved articles stay on disk.
pub async fn logout(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let mut orchestrator = ctx.start().await?;

    if !orchestrator.is_authenticated() {
        output::print_success("Not signed in", format);
        return Ok(());
    }

    orchestrator.sign_out().await;
    output::print_success("Signed out", format);
    Ok(())
}

/// Show session status.
pub async fn status(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let orchestrator = ctx.start().await?;
    let session = orchestrator.session();

    match format {
        OutputFormat::Text => {
            output::print_heading("News Explorer");
            output::print_row("Profile", &ctx.profile);
            output::print_row("Storage", &ctx.storage.to_string());
            match &session.user {
                Some(user) => {
                    output::print_row("Session", "signed in");
                    output::print_row("Name", user.display_name());
                    output::print_row("Email", &user.email);
                    output::print_row(
                        "Saved articles",
                        &orchestrator.saved_articles().len().to_string(),
                    );
                }
                None => output::print_row("Session", "signed out"),
            }
            let key = if ctx.config.news_api_key().is_some() {
                "configured"
            } else {
                "missing (set NEWS_API_KEY)"
            };
            output::print_row("News API key", key);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "profile": ctx.profile,
                "storage": ctx.storage.to_string(),
                "session": session,
                "saved_count": orchestrator.saved_articles().len(),
                "news_api_key_configured": ctx.config.news_api_key().is_some(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
