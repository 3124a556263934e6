pub mod auth;
pub mod browser_setup;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod trend_api;
pub mod utils;
pub mod video_detail;

pub use auth::{AuthInterceptor, AuthParams, run_capture_attempts};
pub use browser_setup::{BrowserSession, download_managed_browser, find_browser_executable};
pub use config::{FtpConfig, ScrapeConfig};
pub use error::{ScrapeError, ScrapeResult};
pub use pipeline::{RunSummary, run};
pub use publish::FtpPublisher;
pub use render::{render_page, write_page};
pub use trend_api::{TrendClient, TrendVideo, select_most_recent};
pub use video_detail::{DetailExtractor, VideoRecord, ViewCount, parse_video_document};
