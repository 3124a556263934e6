//! Fluent builder for `ScrapeConfig`
//!
//! Every field has a default, so there are no required states: construct with
//! `ScrapeConfig::builder()`, override what you need, then `build()`.
//! `build()` is where cross-field rules are applied (the page-count clamp).

use std::path::PathBuf;
use std::time::Duration;

use super::types::{FtpConfig, ScrapeConfig};

#[derive(Debug, Clone, Default)]
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    #[must_use]
    pub fn pages_to_analyze(mut self, pages: u32) -> Self {
        self.config.pages_to_analyze = pages;
        self
    }

    /// Raise or lower the hard page cap. `build()` clamps
    /// `pages_to_analyze` to this value.
    #[must_use]
    pub fn max_pages(mut self, max: u32) -> Self {
        self.config.max_pages = max;
        self
    }

    #[must_use]
    pub fn output_videos(mut self, count: usize) -> Self {
        self.config.output_videos = count;
        self
    }

    #[must_use]
    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.config.country_code = code.into();
        self
    }

    #[must_use]
    pub fn time_period_days(mut self, days: u32) -> Self {
        self.config.time_period_days = days;
        self
    }

    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Pause inserted between successive list/detail requests.
    #[must_use]
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = delay;
        self
    }

    #[must_use]
    pub fn max_auth_attempts(mut self, attempts: u32) -> Self {
        self.config.max_auth_attempts = attempts;
        self
    }

    #[must_use]
    pub fn auth_retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.auth_retry_backoff = backoff;
        self
    }

    /// Per-attempt deadline for the signed-request capture race.
    #[must_use]
    pub fn auth_capture_timeout(mut self, timeout: Duration) -> Self {
        self.config.auth_capture_timeout = timeout;
        self
    }

    #[must_use]
    pub fn videos_per_page(mut self, count: usize) -> Self {
        self.config.videos_per_page = count;
        self
    }

    #[must_use]
    pub fn local_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.local_filename = path.into();
        self
    }

    /// Point the list fetcher at a different base URL (used by tests to
    /// target a mock server).
    #[must_use]
    pub fn trend_list_url(mut self, url: impl Into<String>) -> Self {
        self.config.trend_list_url = url.into();
        self
    }

    #[must_use]
    pub fn base_referer(mut self, url: impl Into<String>) -> Self {
        self.config.base_referer = url.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    #[must_use]
    pub fn ftp(mut self, ftp: Option<FtpConfig>) -> Self {
        self.config.ftp = ftp;
        self
    }

    /// Finalize the config, clamping `pages_to_analyze` to `max_pages`.
    #[must_use]
    pub fn build(mut self) -> ScrapeConfig {
        self.config.pages_to_analyze = self.config.pages_to_analyze.min(self.config.max_pages);
        self.config
    }
}
