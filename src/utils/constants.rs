//! Shared configuration constants for trendtok
//!
//! Default values and endpoint addresses used throughout the codebase to
//! ensure consistency and avoid magic numbers.

/// Trend-list API endpoint (GET, paginated).
///
/// Requests against this endpoint are only accepted with the signed headers
/// captured by the [`crate::auth`] interceptor.
pub const TREND_LIST_URL: &str =
    "https://ads.tiktok.com/creative_radar_api/v1/popular_trend/list";

/// URL path substring identifying the signed trend-list request in the CDP
/// request stream. The creative-center page issues exactly one request
/// matching this during initial load.
pub const TREND_LIST_PATH: &str = "creative_radar_api/v1/popular_trend/list";

/// Referrer page whose client-side script computes and sends the signed
/// headers. Navigated to (headless) during auth capture, and sent as the
/// `Referer` header on list requests afterwards.
pub const BASE_REFERER: &str =
    "https://ads.tiktok.com/business/creativecenter/inspiration/popular/pc/en";

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
/// Next update: 2025-04-29 (quarterly schedule)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Hard upper bound on list pages per run.
///
/// The endpoint stops returning useful data past this depth; the bound also
/// keeps a misconfigured run from hammering the API. Configurable via
/// `ScrapeConfig::max_pages`, this is only the default.
pub const DEFAULT_MAX_PAGES: u32 = 27;

/// Default number of videos carried into the rendered artifact.
pub const DEFAULT_OUTPUT_VIDEOS: usize = 150;

/// Default videos per client-side page in the rendered artifact.
pub const DEFAULT_VIDEOS_PER_PAGE: usize = 9;

/// Per-request timeout for list and detail fetches, in seconds.
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 7;
