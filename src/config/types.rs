//! Core configuration types for the scrape pipeline
//!
//! This module contains the main `ScrapeConfig` struct whose fields define
//! every tunable of a run: list pagination, auth retry policy, pacing,
//! rendering and publish targets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::constants::{
    BASE_REFERER, CHROME_USER_AGENT, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_VIDEOS,
    DEFAULT_VIDEOS_PER_PAGE, TREND_LIST_URL,
};

/// Main configuration struct for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Number of list pages to request, clamped to `max_pages`.
    pub(crate) pages_to_analyze: u32,

    /// Upper bound applied to `pages_to_analyze`.
    ///
    /// The endpoint yields nothing useful past this depth. Kept configurable
    /// rather than hard-coded so the bound can track endpoint behavior.
    pub(crate) max_pages: u32,

    /// Number of videos carried into the rendered artifact (top-N by id).
    pub(crate) output_videos: usize,

    /// Country filter for the trend list, e.g. `"IT"`.
    pub(crate) country_code: String,

    /// Trend window in days, sent as the `period` query parameter.
    pub(crate) time_period_days: u32,

    /// Videos per list page (`limit` query parameter).
    pub(crate) page_size: u32,

    /// Pause between successive list/detail requests.
    ///
    /// Sequential fetching with this delay is deliberate: parallel fan-out
    /// trips the endpoint's rate limiting and anti-automation checks.
    pub(crate) request_delay: Duration,

    /// Maximum browser sessions the interceptor may open before giving up.
    pub(crate) max_auth_attempts: u32,

    /// Pause between failed interceptor attempts.
    pub(crate) auth_retry_backoff: Duration,

    /// Per-attempt deadline for observing the signed request.
    pub(crate) auth_capture_timeout: Duration,

    /// Videos per client-side page in the rendered artifact.
    pub(crate) videos_per_page: usize,

    /// Where the rendered artifact is written locally.
    pub(crate) local_filename: PathBuf,

    /// Trend-list endpoint base URL. Overridable for tests.
    pub(crate) trend_list_url: String,

    /// Page navigated to during auth capture; also the `Referer` on list calls.
    pub(crate) base_referer: String,

    /// User agent sent by both the headless browser and the HTTP client.
    pub(crate) user_agent: String,

    /// Remote publish target. `None` skips the publish step.
    pub(crate) ftp: Option<FtpConfig>,
}

/// Remote file-host credentials and target path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    /// Directory on the remote host, e.g. `/public_html`.
    pub remote_dir: String,
    pub remote_filename: String,
}

impl FtpConfig {
    /// Load publish credentials from `TRENDTOK_FTP_*` environment variables.
    ///
    /// Returns `None` when `TRENDTOK_FTP_HOST` is unset, which disables the
    /// publish step entirely.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("TRENDTOK_FTP_HOST").ok()?;
        Some(Self {
            host,
            user: std::env::var("TRENDTOK_FTP_USER").unwrap_or_default(),
            password: std::env::var("TRENDTOK_FTP_PASSWORD").unwrap_or_default(),
            remote_dir: std::env::var("TRENDTOK_FTP_DIR")
                .unwrap_or_else(|_| "/public_html".to_string()),
            remote_filename: std::env::var("TRENDTOK_FTP_FILENAME")
                .unwrap_or_else(|_| "trendtok.html".to_string()),
        })
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            pages_to_analyze: DEFAULT_MAX_PAGES,
            max_pages: DEFAULT_MAX_PAGES,
            output_videos: DEFAULT_OUTPUT_VIDEOS,
            country_code: "IT".to_string(),
            time_period_days: 7,
            page_size: 20,
            request_delay: Duration::from_millis(10),
            max_auth_attempts: 5,
            auth_retry_backoff: Duration::from_secs(3),
            auth_capture_timeout: Duration::from_secs(7),
            videos_per_page: DEFAULT_VIDEOS_PER_PAGE,
            local_filename: PathBuf::from("trendtok.html"),
            trend_list_url: TREND_LIST_URL.to_string(),
            base_referer: BASE_REFERER.to_string(),
            user_agent: CHROME_USER_AGENT.to_string(),
            ftp: None,
        }
    }
}

impl ScrapeConfig {
    /// Start building a config from defaults.
    #[must_use]
    pub fn builder() -> super::ScrapeConfigBuilder {
        super::ScrapeConfigBuilder::default()
    }
}
