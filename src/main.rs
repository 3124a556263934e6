// trendtok CLI
//
// Captures signed trend-API headers from a headless browser session, walks
// the popular-trend list, and renders (optionally publishes) a static
// browsing page of the most recent videos.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use trendtok::config::{FtpConfig, ScrapeConfig};

#[derive(Parser, Debug)]
#[command(name = "trendtok", version, about = "Trending short-video aggregator")]
struct Cli {
    /// List pages to analyze (capped by the configured maximum)
    #[arg(long)]
    pages: Option<u32>,

    /// Number of videos in the rendered output
    #[arg(long)]
    videos: Option<usize>,

    /// Country code for the trend list
    #[arg(long)]
    country: Option<String>,

    /// Trend window in days
    #[arg(long)]
    period: Option<u32>,

    /// Local path for the rendered artifact
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip the FTP publish step even if TRENDTOK_FTP_* is configured
    #[arg(long)]
    no_publish: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut builder = ScrapeConfig::builder();
    if let Some(pages) = cli.pages {
        builder = builder.pages_to_analyze(pages);
    }
    if let Some(videos) = cli.videos {
        builder = builder.output_videos(videos);
    }
    if let Some(country) = cli.country {
        builder = builder.country_code(country);
    }
    if let Some(period) = cli.period {
        builder = builder.time_period_days(period);
    }
    if let Some(output) = cli.output {
        builder = builder.local_filename(output);
    }
    if !cli.no_publish {
        builder = builder.ftp(FtpConfig::from_env());
    }
    let config = builder.build();

    // anyhow's Debug impl prints the full diagnostic chain on fatal exit.
    let summary = trendtok::pipeline::run(&config).await?;

    println!(
        "Analyzed {} pages, found {} videos, rendered the {} most recent ({} bytes).",
        summary.pages_fetched, summary.total_found, summary.selected, summary.artifact_bytes
    );
    Ok(())
}
