//! Rendered-artifact structure tests

use trendtok::render::{render_page, write_page};
use trendtok::video_detail::{VideoRecord, ViewCount};

fn record(id: &str, title: Option<&str>) -> VideoRecord {
    VideoRecord {
        url: format!("https://www.tiktok.com/@u/video/{id}"),
        title: title.map(str::to_string),
        creator: Some("u".to_string()),
        views: ViewCount::Count(12_000),
        categories: vec!["Comedy".to_string()],
        keywords: vec!["fun".to_string()],
    }
}

/// Pull the embedded JSON payload back out of the artifact.
fn embedded_videos(html: &str) -> serde_json::Value {
    let start = html.find("const videos = ").expect("payload marker") + "const videos = ".len();
    let end = html[start..].find(";\n").expect("payload terminator") + start;
    serde_json::from_str(&html[start..end].replace("<\\/", "</")).expect("payload is valid JSON")
}

#[test]
fn embeds_one_json_entry_per_record() {
    let records = vec![record("1", Some("a")), record("2", Some("b")), record("3", None)];
    let html = render_page(&records, 9);

    let videos = embedded_videos(&html);
    let entries = videos.as_array().unwrap();
    assert_eq!(entries.len(), records.len());

    assert_eq!(entries[0]["id"], "1");
    assert_eq!(entries[0]["title"], "a");
    assert_eq!(entries[0]["views"], "12.000");
    // Sentinel strings are resolved at render time only.
    assert_eq!(entries[2]["title"], "Video unavailable");
}

#[test]
fn page_size_constant_matches_config() {
    let html = render_page(&[record("1", Some("a"))], 9);
    assert!(html.contains("const VIDEOS_PER_PAGE = 9;"));

    let html = render_page(&[record("1", Some("a"))], 4);
    assert!(html.contains("const VIDEOS_PER_PAGE = 4;"));
}

#[test]
fn embeds_are_lazy_loaded() {
    let html = render_page(&[record("1", Some("a"))], 9);
    // The card template defers iframe loading to the IntersectionObserver.
    assert!(html.contains("iframe data-src="));
    assert!(html.contains("IntersectionObserver"));
}

#[test]
fn empty_record_list_renders_valid_page() {
    let html = render_page(&[], 9);
    let videos = embedded_videos(&html);
    assert_eq!(videos.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn write_page_creates_parent_dirs_and_reports_size() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("out.html");
    let html = render_page(&[record("1", Some("a"))], 9);

    let bytes = write_page(&path, &html).await.unwrap();

    assert_eq!(bytes, html.len() as u64);
    assert!(path.exists());
}
