//! Trend-list endpoint client
//!
//! One GET per page against the popular-trend list API, authorized with the
//! captured signed headers. A page that fails at the HTTP or parse level
//! contributes zero items and the run moves on; there is no per-page retry.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::AuthParams;
use crate::config::ScrapeConfig;
use crate::utils::constants::HTTP_REQUEST_TIMEOUT_SECS;

/// One raw record from the trend-list response.
///
/// Unknown fields are ignored; `item_id` stays a string as the API sends it
/// and is parsed numerically only for ordering.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TrendVideo {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub item_url: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl TrendVideo {
    /// Numeric form of `item_id` for ordering. Higher id means more recent.
    /// Non-numeric ids order last.
    #[must_use]
    pub fn item_id_num(&self) -> u64 {
        self.item_id.parse().unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
struct TrendListResponse {
    #[serde(default)]
    data: Option<TrendListData>,
}

#[derive(Debug, Deserialize)]
struct TrendListData {
    #[serde(default)]
    videos: Vec<TrendVideo>,
}

/// HTTP client for the trend-list endpoint.
pub struct TrendClient {
    http: reqwest::Client,
    list_url: String,
    referer: String,
    period: String,
    limit: String,
    country_code: String,
}

impl TrendClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            list_url: config.trend_list_url().to_string(),
            referer: config.base_referer().to_string(),
            period: config.time_period_days().to_string(),
            limit: config.page_size().to_string(),
            country_code: config.country_code().to_string(),
        })
    }

    /// Fetch one result page (1-based).
    ///
    /// Any failure is logged and yields an empty vec so the pagination loop
    /// can keep going.
    pub async fn fetch_page(&self, page: u32, auth: &AuthParams) -> Vec<TrendVideo> {
        match self.try_fetch_page(page, auth).await {
            Ok(videos) => {
                debug!("Page {page} loaded with {} videos", videos.len());
                videos
            }
            Err(e) => {
                warn!("Page {page} failed: {e:#}");
                Vec::new()
            }
        }
    }

    async fn try_fetch_page(&self, page: u32, auth: &AuthParams) -> Result<Vec<TrendVideo>> {
        let page = page.to_string();
        let response = self
            .http
            .get(&self.list_url)
            .query(&[
                ("period", self.period.as_str()),
                ("limit", self.limit.as_str()),
                ("order_by", "vv"),
                ("country_code", self.country_code.as_str()),
                ("page", page.as_str()),
            ])
            .header("timestamp", &auth.timestamp)
            .header("user-sign", &auth.user_sign)
            .header("anonymous-user-id", &auth.anonymous_user_id)
            .header("Accept", "application/json")
            .header("Referer", &self.referer)
            .send()
            .await
            .context("Request failed")?
            .error_for_status()
            .context("Endpoint returned error status")?;

        let body: TrendListResponse = response
            .json()
            .await
            .context("Failed to parse list response body")?;

        Ok(body.data.map(|d| d.videos).unwrap_or_default())
    }
}

/// Order the collected bag by numeric id descending (stable, so ties keep
/// their input order) and keep the first `n`.
#[must_use]
pub fn select_most_recent(mut videos: Vec<TrendVideo>, n: usize) -> Vec<TrendVideo> {
    videos.sort_by(|a, b| b.item_id_num().cmp(&a.item_id_num()));
    videos.truncate(n);
    videos
}
