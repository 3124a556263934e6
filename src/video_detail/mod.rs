//! Per-video detail extraction
//!
//! Each selected video page embeds its metadata as JSON inside a hydration
//! `<script>` element. This module fetches the page, digs the item record out
//! of the fixed nested path and flattens it into a [`VideoRecord`].
//!
//! Extraction never fails the run: a page that yields no parsable document
//! becomes a placeholder record, and a document with unexpected structure
//! becomes a best-effort record with defaulted fields. The pipeline relies on
//! getting exactly one record back per URL.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ScrapeConfig;
use crate::utils::constants::HTTP_REQUEST_TIMEOUT_SECS;

/// Script element carrying the page's hydration state.
const HYDRATION_SCRIPT_ID: &str = "__UNIVERSAL_DATA_FOR_REHYDRATION__";

/// View count with an explicit unavailable state.
///
/// Kept typed through the pipeline; turned into a display string only at
/// render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCount {
    Count(u64),
    /// Numeric field was present but not parsable as a number; passed
    /// through in its string form unchanged.
    Raw(String),
    Unavailable,
}

impl ViewCount {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(count) => Self::Count(count),
                None => Self::Raw(n.to_string()),
            },
            Some(Value::String(s)) => match s.parse::<u64>() {
                Ok(count) => Self::Count(count),
                Err(_) => Self::Raw(s.clone()),
            },
            _ => Self::Unavailable,
        }
    }
}

impl fmt::Display for ViewCount {
    /// Counts render with `.` thousands separators, matching the page's
    /// locale convention.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => f.write_str(&group_thousands(*n)),
            Self::Raw(s) => f.write_str(s),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Flat record for one selected video, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub url: String,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub views: ViewCount,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
}

impl VideoRecord {
    /// Sentinel record for a video whose page yielded no usable document.
    #[must_use]
    pub fn placeholder(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: None,
            creator: None,
            views: ViewCount::Unavailable,
            categories: Vec::new(),
            keywords: Vec::new(),
        }
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Video unavailable")
    }

    #[must_use]
    pub fn display_creator(&self) -> &str {
        self.creator.as_deref().unwrap_or("N/A")
    }
}

/// Fetches video pages and extracts their embedded metadata.
pub struct DetailExtractor {
    http: reqwest::Client,
}

impl DetailExtractor {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// Extract the detail record for one video URL.
    ///
    /// Always returns a record; failures degrade to the placeholder.
    pub async fn extract(&self, url: &str) -> VideoRecord {
        match self.try_extract(url).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No hydration document found for {url}");
                VideoRecord::placeholder(url)
            }
            Err(e) => {
                warn!("Detail extraction failed for {url}: {e:#}");
                VideoRecord::placeholder(url)
            }
        }
    }

    async fn try_extract(&self, url: &str) -> Result<Option<VideoRecord>> {
        let html = self
            .http
            .get(url)
            .send()
            .await
            .context("Request failed")?
            .error_for_status()
            .context("Video page returned error status")?
            .text()
            .await
            .context("Failed to read video page body")?;

        Ok(parse_video_document(url, &html))
    }
}

/// Pull the item record out of the page's hydration JSON.
///
/// Returns `None` when the page carries no hydration script or the script
/// body is not JSON. A parsed document whose inner structure is missing
/// still produces a record, just with defaulted fields.
#[must_use]
pub fn parse_video_document(url: &str, html: &str) -> Option<VideoRecord> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("script#{HYDRATION_SCRIPT_ID}")).ok()?;
    let script = document.select(&selector).next()?;
    let json: Value = serde_json::from_str(&script.inner_html()).ok()?;

    let item = json
        .get("__DEFAULT_SCOPE__")
        .and_then(|v| v.get("webapp.video-detail"))
        .and_then(|v| v.get("itemInfo"))
        .and_then(|v| v.get("itemStruct"));

    let get_str = |field: &str| {
        item.and_then(|i| i.get(field))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let get_str_list = |field: &str| {
        item.and_then(|i| i.get(field))
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    Some(VideoRecord {
        url: url.to_string(),
        title: get_str("desc"),
        creator: item
            .and_then(|i| i.get("author"))
            .and_then(|a| a.get("nickname"))
            .and_then(Value::as_str)
            .map(str::to_string),
        views: ViewCount::from_json(
            item.and_then(|i| i.get("stats")).and_then(|s| s.get("playCount")),
        ),
        categories: get_str_list("diversificationLabels"),
        keywords: get_str_list("suggestedWords"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(ViewCount::Count(0).to_string(), "0");
        assert_eq!(ViewCount::Count(999).to_string(), "999");
        assert_eq!(ViewCount::Count(1_000).to_string(), "1.000");
        assert_eq!(ViewCount::Count(1_234_567).to_string(), "1.234.567");
    }

    #[test]
    fn malformed_count_passes_through_unchanged() {
        let views = ViewCount::from_json(Some(&Value::String("lots".to_string())));
        assert_eq!(views, ViewCount::Raw("lots".to_string()));
        assert_eq!(views.to_string(), "lots");
    }

    #[test]
    fn missing_count_is_unavailable() {
        assert_eq!(ViewCount::from_json(None), ViewCount::Unavailable);
        assert_eq!(ViewCount::Unavailable.to_string(), "N/A");
    }

    #[test]
    fn numeric_string_count_is_parsed() {
        let views = ViewCount::from_json(Some(&Value::String("4200".to_string())));
        assert_eq!(views, ViewCount::Count(4200));
    }

    #[test]
    fn page_without_hydration_script_yields_none() {
        let html = "<html><body><p>blocked</p></body></html>";
        assert!(parse_video_document("https://example.com/v/1", html).is_none());
    }

    #[test]
    fn unexpected_structure_yields_defaulted_record() {
        let html = format!(
            "<html><body><script id=\"{HYDRATION_SCRIPT_ID}\">{{\"__DEFAULT_SCOPE__\":{{}}}}</script></body></html>"
        );
        let record = parse_video_document("https://example.com/v/1", &html).unwrap();
        assert_eq!(record.title, None);
        assert_eq!(record.views, ViewCount::Unavailable);
        assert!(record.categories.is_empty());
    }
}
