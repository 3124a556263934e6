//! Getter methods for `ScrapeConfig`
//!
//! Accessor methods for retrieving configuration values from a built
//! `ScrapeConfig` instance.

use std::path::Path;
use std::time::Duration;

use super::types::{FtpConfig, ScrapeConfig};

impl ScrapeConfig {
    #[must_use]
    pub fn pages_to_analyze(&self) -> u32 {
        self.pages_to_analyze
    }

    #[must_use]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    #[must_use]
    pub fn output_videos(&self) -> usize {
        self.output_videos
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    #[must_use]
    pub fn time_period_days(&self) -> u32 {
        self.time_period_days
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    #[must_use]
    pub fn max_auth_attempts(&self) -> u32 {
        self.max_auth_attempts
    }

    #[must_use]
    pub fn auth_retry_backoff(&self) -> Duration {
        self.auth_retry_backoff
    }

    #[must_use]
    pub fn auth_capture_timeout(&self) -> Duration {
        self.auth_capture_timeout
    }

    #[must_use]
    pub fn videos_per_page(&self) -> usize {
        self.videos_per_page
    }

    #[must_use]
    pub fn local_filename(&self) -> &Path {
        &self.local_filename
    }

    #[must_use]
    pub fn trend_list_url(&self) -> &str {
        &self.trend_list_url
    }

    #[must_use]
    pub fn base_referer(&self) -> &str {
        &self.base_referer
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn ftp(&self) -> Option<&FtpConfig> {
        self.ftp.as_ref()
    }
}
