//! Browser-driven authorization exchange for terminal applications
//!
//! Opens the authorization URL in the system browser and asks the user to
//! paste the URL the provider redirected to. The implicit grant puts the
//! token in the URL fragment; errors arrive in the query string.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::callbacks::AuthorizationExchange;
use crate::error::{AuthSessionError, Result};
use crate::types::ExchangeResult;

/// Exchange that round-trips through the user's browser and terminal
#[derive(Debug, Clone)]
pub struct BrowserExchange {
    auto_open_browser: bool,
}

impl Default for BrowserExchange {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserExchange {
    /// Exchange that opens the browser automatically
    #[must_use]
    pub fn new() -> Self {
        Self {
            auto_open_browser: true,
        }
    }

    /// Set whether to automatically open browser (default: true)
    #[must_use]
    pub fn auto_open_browser(mut self, auto_open: bool) -> Self {
        self.auto_open_browser = auto_open;
        self
    }

    /// Open URL in default browser
    fn open_browser(url: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(url)
                .spawn()
                .map_err(|e| AuthSessionError::BrowserOpen(e.to_string()))?;
        }

        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(url)
                .spawn()
                .map_err(|e| AuthSessionError::BrowserOpen(e.to_string()))?;
        }

        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", "", url])
                .spawn()
                .map_err(|e| AuthSessionError::BrowserOpen(e.to_string()))?;
        }

        Ok(())
    }

    /// Prompt user for the redirected URL
    fn prompt_for_redirect() -> Result<String> {
        print!("Paste the URL you were redirected to (or 'cancel' to abort): ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().lock().read_line(&mut input)?;
        Ok(input)
    }
}

#[async_trait]
impl AuthorizationExchange for BrowserExchange {
    async fn exchange(&self, auth_url: &str) -> Result<ExchangeResult> {
        println!();
        println!("To sign in, please:");
        println!("  1. Open the following URL in your browser");
        println!("  2. Approve access for this application");
        println!("  3. Copy the full URL of the page you land on");
        println!();
        println!("Authorization URL:");
        println!("  {auth_url}");
        println!();

        if self.auto_open_browser {
            if let Err(e) = Self::open_browser(auth_url) {
                tracing::debug!("Could not open browser: {e}");
                println!("(Could not open browser automatically - please open the URL manually)");
            } else {
                println!("(Opening browser...)");
            }
        }

        let input = tokio::task::spawn_blocking(Self::prompt_for_redirect)
            .await
            .map_err(|e| AuthSessionError::exchange(format!("prompt task failed: {e}")))??;

        Ok(parse_redirect(&input))
    }
}

/// Turn the pasted redirect URL into an exchange result
///
/// Empty input or `cancel` is a cancellation; anything that is not a URL
/// carrying parameters is a failure. Fragment values override query values.
#[must_use]
pub fn parse_redirect(input: &str) -> ExchangeResult {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("cancel") {
        return ExchangeResult::cancelled();
    }

    let Ok(url) = url::Url::parse(input) else {
        tracing::debug!("Redirect input is not a URL");
        return ExchangeResult::failure();
    };

    let mut params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    if let Some(fragment) = url.fragment() {
        params.extend(url::form_urlencoded::parse(fragment.as_bytes()).into_owned());
    }

    if params.is_empty() {
        return ExchangeResult::failure();
    }
    ExchangeResult::success(params)
}
