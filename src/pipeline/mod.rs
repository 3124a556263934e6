//! Run orchestration
//!
//! Sequences the whole pipeline: capture auth headers, walk the list pages,
//! pick the most recent N, extract per-video detail, render the artifact and
//! optionally publish it. List and detail fetches are strictly sequential
//! with a pacing delay; parallel fan-out trips the endpoint's rate limiting.

use tracing::{info, warn};

use crate::auth::AuthInterceptor;
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::publish::FtpPublisher;
use crate::render::{render_page, write_page};
use crate::trend_api::{TrendClient, select_most_recent};
use crate::video_detail::DetailExtractor;

/// Outcome counters for a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pages_fetched: u32,
    pub total_found: usize,
    pub selected: usize,
    pub artifact_bytes: u64,
}

/// Execute one full scrape run.
pub async fn run(config: &ScrapeConfig) -> ScrapeResult<RunSummary> {
    info!(
        pages = config.pages_to_analyze(),
        output_videos = config.output_videos(),
        country = config.country_code(),
        period_days = config.time_period_days(),
        artifact = %config.local_filename().display(),
        "Starting scrape run"
    );

    // Without the signed headers nothing can be fetched; acquisition failure
    // halts the run before any HTTP traffic.
    let interceptor = AuthInterceptor::new(config);
    let auth = interceptor.acquire().await?;

    let client =
        TrendClient::new(config).map_err(|e| ScrapeError::Network(format!("{e:#}")))?;
    let pages = config.pages_to_analyze();
    let mut all_videos = Vec::new();
    for page in 1..=pages {
        let videos = client.fetch_page(page, &auth).await;
        if !videos.is_empty() {
            info!("Page {page}/{pages} completed ({} videos)", videos.len());
            all_videos.extend(videos);
        }
        // Paced even after the final page; the endpoint watches burst timing.
        tokio::time::sleep(config.request_delay()).await;
    }

    let total_found = all_videos.len();
    info!("Total videos found: {total_found}");
    if total_found == 0 {
        warn!("No videos collected; rendering an empty page");
    }

    let selected = select_most_recent(all_videos, config.output_videos());
    info!(
        "Analyzing the {} most recent of {total_found} videos",
        selected.len()
    );

    let extractor =
        DetailExtractor::new(config).map_err(|e| ScrapeError::Network(format!("{e:#}")))?;
    let mut records = Vec::with_capacity(selected.len());
    for (idx, video) in selected.iter().enumerate() {
        info!(
            "Analyzing video {}/{}: {}",
            idx + 1,
            selected.len(),
            video.item_url
        );
        records.push(extractor.extract(&video.item_url).await);
        tokio::time::sleep(config.request_delay()).await;
    }

    // One record per selected URL, placeholder or not.
    debug_assert_eq!(records.len(), selected.len());

    let html = render_page(&records, config.videos_per_page());
    let artifact_bytes = write_page(config.local_filename(), &html)
        .await
        .map_err(|e| ScrapeError::Artifact(format!("{e:#}")))?;

    if let Some(ftp) = config.ftp() {
        FtpPublisher::new(ftp.clone())
            .publish(config.local_filename())
            .await?;
    } else {
        info!("No publish target configured; skipping upload");
    }

    let summary = RunSummary {
        pages_fetched: pages,
        total_found,
        selected: records.len(),
        artifact_bytes,
    };
    info!(
        "Run complete: {} pages, {} videos found, {} rendered",
        summary.pages_fetched, summary.total_found, summary.selected
    );
    Ok(summary)
}
