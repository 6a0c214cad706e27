//! Sign-in demo
//!
//! Walks through the implicit-grant flow against Twitch: opens the
//! authorization page, reads the redirect URL pasted back on stdin, fetches
//! the profile and signs out again.
//!
//! Run with: cargo run -p signin-demo
//!
//! Environment:
//! - `AUTH_SESSION_CLIENT_ID`, `AUTH_SESSION_REDIRECT_URI`, `AUTH_SESSION_API_BASE_URL`
//! - `SIGNIN_DEMO_NO_BROWSER` to print the URL instead of opening it
//! - `SIGNIN_DEMO_KEEP_SESSION=1` to skip the final sign-out
//! - `RUST_LOG` for log filtering (e.g. `RUST_LOG=auth_session=debug`)

mod config;

use anyhow::Result;
use auth_session::{
    AuthConfig, AuthSessionManager, AuthSnapshot, BrowserExchange, SignInOutcome,
};
use console::style;
use futures::StreamExt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn describe(snapshot: &AuthSnapshot) -> String {
    let who = snapshot
        .user
        .as_ref()
        .map_or_else(|| "nobody".to_string(), |u| u.display_name.clone());
    let mut flags = Vec::new();
    if snapshot.is_logging_in {
        flags.push("logging in");
    }
    if snapshot.is_logging_out {
        flags.push("logging out");
    }
    if flags.is_empty() {
        format!("signed in as {who}")
    } else {
        format!("signed in as {who} ({})", flags.join(", "))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if config::no_color() {
        console::set_colors_enabled(false);
    }

    let auth_config = AuthConfig::from_env()?;
    let manager = Arc::new(
        AuthSessionManager::builder()
            .config(auth_config)
            .exchange(Arc::new(BrowserExchange::new().auto_open_browser(
                config::auto_open_browser(),
            )))
            .build()?,
    );

    let watcher = tokio::spawn({
        let changes = manager.changes();
        async move {
            futures::pin_mut!(changes);
            while let Some(snapshot) = changes.next().await {
                println!("{} {}", style("session:").dim(), describe(&snapshot));
            }
        }
    });

    match manager.sign_in().await {
        Ok(SignInOutcome::SignedIn(user)) => {
            println!(
                "{} {} (id {})",
                style("Welcome,").green().bold(),
                style(&user.display_name).bold(),
                user.id
            );
            if !user.email.is_empty() {
                println!("  email: {}", user.email);
            }
            if !user.profile_image_url.is_empty() {
                println!("  avatar: {}", user.profile_image_url);
            }
        }
        Ok(SignInOutcome::Cancelled) => println!("{}", style("Sign-in cancelled").yellow()),
        Ok(SignInOutcome::Denied) => println!("{}", style("Access denied").yellow()),
        Ok(SignInOutcome::Failed) => {
            println!("{}", style("Authorization did not complete").yellow());
        }
        Err(e) => eprintln!("{} {e}", style("Sign-in failed:").red().bold()),
    }

    if config::sign_out_on_exit() && manager.is_authenticated() {
        manager.sign_out().await;
        println!("{}", style("Signed out").dim());
    }

    watcher.abort();
    Ok(())
}
