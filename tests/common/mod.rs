//! Test utilities and fixtures shared across the trendtok test suite

use trendtok::auth::AuthParams;
use trendtok::config::ScrapeConfig;

/// Signed-header fixture for authorized list calls.
#[allow(dead_code)]
pub fn test_auth() -> AuthParams {
    AuthParams {
        timestamp: "1718000000".to_string(),
        user_sign: "test-sign".to_string(),
        anonymous_user_id: "anon-1".to_string(),
    }
}

/// Config pointed at a mock server instead of the real endpoints.
#[allow(dead_code)]
pub fn test_config(server_url: &str) -> ScrapeConfig {
    ScrapeConfig::builder()
        .trend_list_url(format!(
            "{server_url}/creative_radar_api/v1/popular_trend/list"
        ))
        .base_referer(format!("{server_url}/popular"))
        .page_size(20)
        .build()
}

/// Trend-list response body with the given item ids.
#[allow(dead_code)]
pub fn list_body(ids: &[&str]) -> String {
    let videos: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"item_id":"{id}","item_url":"https://www.tiktok.com/@u/video/{id}","title":"video {id}"}}"#
            )
        })
        .collect();
    format!(r#"{{"code":0,"data":{{"videos":[{}]}}}}"#, videos.join(","))
}

/// Video page with an embedded hydration document.
#[allow(dead_code)]
pub fn video_page(desc: &str, nickname: &str, play_count: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{desc}</title></head>
<body>
<script id="__UNIVERSAL_DATA_FOR_REHYDRATION__" type="application/json">{{
  "__DEFAULT_SCOPE__": {{
    "webapp.video-detail": {{
      "itemInfo": {{
        "itemStruct": {{
          "desc": "{desc}",
          "author": {{"nickname": "{nickname}"}},
          "stats": {{"playCount": {play_count}}},
          "diversificationLabels": ["Comedy", "Lifestyle"],
          "suggestedWords": ["funny", "trending"]
        }}
      }}
    }}
  }}
}}</script>
</body>
</html>"#
    )
}
