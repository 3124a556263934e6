//! Static page rendering
//!
//! Serializes the full record list into one self-contained HTML artifact.
//! All records ship as an inline JSON array; pagination, lazy iframe loading
//! and navigation run client-side, so the artifact needs no server beyond
//! static file hosting.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::video_detail::VideoRecord;

/// Page skeleton. `__VIDEOS_JSON__` and `__VIDEOS_PER_PAGE__` are substituted
/// at render time; everything else is static.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>TrendTok</title>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet">
    <style>
        * {
            box-sizing: border-box;
            margin: 0;
            padding: 0;
        }

        :root {
            --primary: #00f2ea;
            --secondary: #ff0050;
            --bg-dark: #121212;
            --card-bg: #1e1e1e;
            --text: #ffffff;
            --text-secondary: #a0a0a0;
            --card-hover: #2d2d2d;
        }

        body {
            font-family: 'Inter', sans-serif;
            background: var(--bg-dark);
            color: var(--text);
            margin: 0;
            padding: 0;
            min-height: 100vh;
        }

        .container {
            max-width: 1400px;
            margin: 0 auto;
            padding: 20px;
        }

        .grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(350px, 1fr));
            gap: 24px;
            padding: 20px 0;
        }

        .video-card {
            background: var(--card-bg);
            border-radius: 16px;
            padding: 20px;
            transition: transform 0.2s ease, background-color 0.2s ease;
            border: 1px solid rgba(255, 255, 255, 0.1);
        }

        .video-card:hover {
            transform: translateY(-5px);
            background: var(--card-hover);
        }

        .video-title {
            font-size: 18px;
            font-weight: 600;
            margin-bottom: 16px;
            line-height: 1.4;
            color: var(--text);
        }

        .video-stats {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 16px;
            color: var(--text-secondary);
            font-size: 14px;
        }

        .video-url {
            font-size: 14px;
            word-break: break-all;
            margin-bottom: 16px;
            padding: 12px;
            background: rgba(255, 255, 255, 0.05);
            border-radius: 8px;
        }

        .video-url a {
            color: var(--primary);
            text-decoration: none;
            transition: color 0.2s ease;
        }

        .video-url a:hover {
            color: var(--secondary);
        }

        .video-container {
            margin-bottom: 20px;
            border-radius: 12px;
            overflow: hidden;
            background: var(--bg-dark);
        }

        .video-embed {
            position: relative;
            padding-bottom: 177.77%;
            height: 0;
            overflow: hidden;
        }

        .video-embed iframe {
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            border: none;
        }

        .tag {
            display: inline-block;
            background: rgba(0, 242, 234, 0.1);
            color: var(--primary);
            padding: 6px 12px;
            border-radius: 20px;
            margin: 4px;
            font-size: 12px;
            font-weight: 500;
            transition: all 0.2s ease;
        }

        .tag:hover {
            background: rgba(0, 242, 234, 0.2);
            transform: scale(1.05);
        }

        .header {
            text-align: center;
            padding: 40px 20px;
            margin-bottom: 20px;
            position: relative;
            overflow: hidden;
            background: linear-gradient(135deg, var(--card-bg) 0%, var(--bg-dark) 100%);
            border-radius: 20px;
            border: 1px solid rgba(255, 255, 255, 0.1);
        }

        .header h1 {
            font-size: 48px;
            font-weight: 700;
            margin-bottom: 12px;
            background: linear-gradient(45deg, var(--primary), var(--secondary));
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }

        .header p {
            color: var(--text-secondary);
            font-size: 18px;
        }

        .pagination {
            display: flex;
            justify-content: center;
            gap: 12px;
            margin: 32px 0;
        }

        .pagination button {
            padding: 12px 24px;
            border: none;
            background: var(--card-bg);
            color: var(--text);
            border-radius: 12px;
            cursor: pointer;
            font-weight: 500;
            transition: all 0.2s ease;
            border: 1px solid rgba(255, 255, 255, 0.1);
            font-size: 14px;
        }

        .pagination button:not(:disabled):hover {
            background: var(--card-hover);
            transform: translateY(-2px);
        }

        .pagination button:disabled {
            background: rgba(255, 255, 255, 0.1);
            cursor: not-allowed;
            opacity: 0.5;
        }

        .pagination-info {
            text-align: center;
            margin: 20px 0;
            color: var(--text-secondary);
            font-size: 14px;
        }

        .metadata {
            margin-top: 16px;
            padding: 16px;
            background: rgba(255, 255, 255, 0.05);
            border-radius: 12px;
        }

        .metadata strong {
            display: block;
            margin-bottom: 8px;
            color: var(--text-secondary);
        }

        @media (max-width: 768px) {
            .grid {
                grid-template-columns: 1fr;
                padding: 10px;
            }
            .header h1 {
                font-size: 36px;
            }
            .header p {
                font-size: 16px;
            }
            .container {
                padding: 10px;
            }
        }

        @media (min-width: 769px) and (max-width: 1200px) {
            .grid {
                grid-template-columns: repeat(2, 1fr);
            }
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>TrendTok</h1>
            <p>The most popular videos right now</p>
        </div>
        <div class="pagination"></div>
        <div class="pagination-info"></div>
        <div class="grid" id="videos-container">
        </div>
        <div class="pagination"></div>
    </div>
    <script>
        const VIDEOS_PER_PAGE = __VIDEOS_PER_PAGE__;
        const videos = __VIDEOS_JSON__;

        let currentPage = 1;
        const totalPages = Math.ceil(videos.length / VIDEOS_PER_PAGE);

        const videoObserver = new IntersectionObserver((entries, observer) => {
            entries.forEach(entry => {
                if (entry.isIntersecting) {
                    const container = entry.target;
                    const iframe = container.querySelector('iframe');
                    if (iframe.dataset.src) {
                        iframe.src = iframe.dataset.src;
                        iframe.removeAttribute('data-src');
                        observer.unobserve(container);
                    }
                }
            });
        }, {
            rootMargin: '50px 0px',
            threshold: 0.1
        });

        function createVideoCard(video) {
            const categories = video.categories.map(cat =>
                `<span class="tag">${cat}</span>`).join(' ') || 'No categories';
            const keywords = video.keywords.map(kw =>
                `<span class="tag">${kw}</span>`).join(' ') || 'No keywords';

            const card = document.createElement('div');
            card.className = 'video-card';
            card.innerHTML = `
                <div class="video-title">${video.title}</div>
                <div class="video-stats">
                    <span><strong>Creator:</strong> ${video.creator}</span>
                    <span><strong>Views:</strong> ${video.views}</span>
                </div>
                <div class="video-url">
                    <a href="${video.url}" target="_blank">${video.url}</a>
                </div>
                <div class="video-container">
                    <div class="video-embed">
                        <iframe data-src="https://www.tiktok.com/embed/${video.id}"
                                allowfullscreen scrolling="no"
                                allow="encrypted-media;">
                        </iframe>
                    </div>
                </div>
                <div class="metadata">
                    <strong>Categories:</strong>
                    ${categories}
                </div>
                <div class="metadata" style="margin-top: 16px;">
                    <strong>Keywords:</strong>
                    ${keywords}
                </div>
            `;
            return card;
        }

        function updatePagination() {
            const paginationElements = document.querySelectorAll('.pagination');
            const paginationHTML = `
                <button onclick="changePage(1)" ${currentPage === 1 ? 'disabled' : ''}>First</button>
                <button onclick="changePage(${currentPage - 1})" ${currentPage === 1 ? 'disabled' : ''}>⬅️</button>
                <button onclick="changePage(${currentPage + 1})" ${currentPage === totalPages ? 'disabled' : ''}>➡️</button>
                <button onclick="changePage(${totalPages})" ${currentPage === totalPages ? 'disabled' : ''}>Last</button>
            `;
            paginationElements.forEach(el => el.innerHTML = paginationHTML);

            document.querySelector('.pagination-info').textContent =
                `Page ${currentPage} of ${totalPages} (${videos.length} videos)`;
        }

        function changePage(newPage) {
            if (newPage < 1 || newPage > totalPages) return;
            currentPage = newPage;
            displayCurrentPage();
            updatePagination();
            window.scrollTo({
                top: 0,
                behavior: 'smooth'
            });
        }

        function displayCurrentPage() {
            const container = document.getElementById('videos-container');
            container.innerHTML = '';

            const start = (currentPage - 1) * VIDEOS_PER_PAGE;
            const end = start + VIDEOS_PER_PAGE;
            const pageVideos = videos.slice(start, end);

            pageVideos.forEach(video => {
                const card = createVideoCard(video);
                container.appendChild(card);
                videoObserver.observe(card.querySelector('.video-container'));
            });
        }

        displayCurrentPage();
        updatePagination();
    </script>
</body>
</html>
"#;

/// Embed id for a record: the last non-empty path segment of its URL.
fn embed_id(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()?
                .rev()
                .find(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_default()
}

/// Build the inline JSON payload the page script consumes.
fn videos_json(records: &[VideoRecord]) -> String {
    let payload: Vec<_> = records
        .iter()
        .map(|record| {
            json!({
                "id": embed_id(&record.url),
                "title": record.display_title(),
                "creator": record.display_creator(),
                "views": record.views.to_string(),
                "url": record.url,
                "categories": record.categories,
                "keywords": record.keywords,
            })
        })
        .collect();

    // A literal "</script>" inside a title would terminate the script
    // element early; escape the closing delimiter inside JSON strings.
    serde_json::to_string(&payload)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

/// Render the full artifact for the given records.
#[must_use]
pub fn render_page(records: &[VideoRecord], videos_per_page: usize) -> String {
    PAGE_TEMPLATE
        .replace("__VIDEOS_PER_PAGE__", &videos_per_page.to_string())
        .replace("__VIDEOS_JSON__", &videos_json(records))
}

/// Write the artifact and verify it landed on disk.
///
/// A missing file after the write is fatal for the run.
pub async fn write_page(path: &Path, html: &str) -> Result<u64> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .context("Failed to create output directory")?;
    }

    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write artifact to {}", path.display()))?;

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Artifact missing after write: {}", path.display()))?;

    info!(
        "Artifact written: {} ({} bytes)",
        path.display(),
        metadata.len()
    );
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_detail::ViewCount;

    fn record(id: &str) -> VideoRecord {
        VideoRecord {
            url: format!("https://www.tiktok.com/@user/video/{id}"),
            title: Some(format!("video {id}")),
            creator: Some("creator".to_string()),
            views: ViewCount::Count(1500),
            categories: vec!["Comedy".to_string()],
            keywords: vec!["fun".to_string()],
        }
    }

    #[test]
    fn embed_id_is_last_path_segment() {
        assert_eq!(embed_id("https://www.tiktok.com/@u/video/123"), "123");
        assert_eq!(embed_id("https://www.tiktok.com/@u/video/123/"), "123");
        assert_eq!(embed_id("not a url"), "");
    }

    #[test]
    fn script_close_tag_is_escaped_in_payload() {
        let mut rec = record("1");
        rec.title = Some("</script><b>x</b>".to_string());
        let json = videos_json(&[rec]);
        assert!(!json.contains("</script>"));
    }
}
