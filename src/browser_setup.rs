//! Browser lifecycle management for auth capture
//!
//! Handles locating, launching and tearing down chromiumoxide browser
//! instances with stealth configuration to avoid bot detection. Every
//! interceptor attempt gets its own [`BrowserSession`] backed by a fresh
//! user-data directory, so no cookie or storage state leaks between attempts.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};

/// Find a Chrome/Chromium executable on the system.
///
/// `CHROMIUM_PATH` overrides all other lookup methods.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    let paths = if cfg!(target_os = "macos") {
        vec![
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        vec![
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for path_str in paths {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
            let output = Command::new("which").arg(cmd).output();
            if let Ok(output) = output
                && output.status.success()
            {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path_str.is_empty() {
                    let path = PathBuf::from(path_str);
                    info!("Found browser using 'which': {}", path.display());
                    return Ok(path);
                }
            }
        }
    }

    warn!("No Chrome/Chromium executable found. Will download and use fetcher.");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Downloads and manages a Chromium browser if none is found locally.
/// Returns the path to the downloaded executable.
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!("Downloading managed Chromium browser...");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("trendtok")
        .join("chromium");

    std::fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );

    let revision_info = fetcher.fetch().await.context("Failed to fetch browser")?;

    info!(
        "Downloaded Chromium to: {}",
        revision_info.folder_path.display()
    );

    Ok(revision_info.executable_path)
}

/// A single-use browser with its CDP event-handler task.
///
/// The handler MUST be aborted once the browser is done, otherwise it keeps
/// polling a dead websocket. `shutdown()` does the orderly teardown; `Drop`
/// is the backstop for early-exit paths.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch an isolated headless browser with stealth configuration.
    ///
    /// `user_data_dir` must be unique per session; it is created here and
    /// removed again at teardown.
    pub async fn launch(user_agent: &str, user_data_dir: PathBuf) -> Result<Self> {
        let chrome_path = match find_browser_executable().await {
            Ok(path) => path,
            Err(_) => download_managed_browser().await?,
        };

        std::fs::create_dir_all(&user_data_dir)
            .context("Failed to create user data directory")?;

        let browser_config = BrowserConfigBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .window_size(1920, 1080)
            .user_data_dir(user_data_dir.clone())
            .chrome_executable(chrome_path)
            .headless_mode(HeadlessMode::default())
            // Stealth mode arguments
            .arg(format!("--user-agent={user_agent}"))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--disable-notifications")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--disable-background-networking")
            .arg("--disable-background-timer-throttling")
            .arg("--disable-backgrounding-occluded-windows")
            .arg("--disable-breakpad")
            .arg("--disable-hang-monitor")
            .arg("--disable-ipc-flooding-protection")
            .arg("--disable-prompt-on-repost")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--metrics-recording-only")
            .arg("--password-store=basic")
            .arg("--use-mock-keychain")
            .arg("--hide-scrollbars")
            .arg("--mute-audio")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        let handler_task = task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let error_msg = e.to_string();
                    // Chrome sends CDP events chromiumoxide doesn't recognize;
                    // those deserialization failures are noise, not faults.
                    // https://github.com/mattsse/chromiumoxide/issues/167
                    let benign = error_msg
                        .contains("data did not match any variant of untagged enum Message")
                        || error_msg.contains("Failed to deserialize WS response");
                    if benign {
                        trace!("Suppressed benign CDP serialization error: {error_msg}");
                    } else {
                        error!("Browser handler error: {e:?}");
                    }
                }
            }
            trace!("Browser event handler task completed");
        });

        Ok(Self {
            browser,
            handler: handler_task,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Open a blank page. The interceptor registers its network listener on
    /// this page before navigating anywhere.
    pub async fn new_blank_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")
    }

    /// Orderly teardown: close Chrome, stop the handler task, remove the
    /// profile directory.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Error closing browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            trace!("Browser wait after close: {e}");
        }
        self.handler.abort();
        self.cleanup_user_data_dir();
    }

    /// Remove the per-session profile directory (blocking; also callable
    /// from Drop).
    fn cleanup_user_data_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up user data dir {}: {e}. Manual cleanup may be required.",
                    path.display()
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop kills the Chrome process itself.
        if self.user_data_dir.is_some() {
            warn!("BrowserSession dropped without explicit shutdown - removing user data dir in Drop");
            self.cleanup_user_data_dir();
        }
    }
}
