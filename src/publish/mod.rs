//! Remote publish over FTP
//!
//! Transfers the rendered artifact to the configured file host and verifies
//! the upload by comparing byte sizes. The FTP client is blocking, so the
//! whole session runs inside `spawn_blocking`.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use suppaftp::FtpStream;
use tracing::{debug, info};

use crate::config::FtpConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Uploads one artifact to a fixed remote path.
pub struct FtpPublisher {
    config: FtpConfig,
}

impl FtpPublisher {
    #[must_use]
    pub fn new(config: FtpConfig) -> Self {
        Self { config }
    }

    /// Upload `local_path` and verify size parity with the remote copy.
    ///
    /// Transfer errors, a missing remote file and a size mismatch are all
    /// fatal for the run.
    pub async fn publish(&self, local_path: &Path) -> ScrapeResult<()> {
        let local_size = std::fs::metadata(local_path)
            .with_context(|| format!("Local artifact missing: {}", local_path.display()))
            .map_err(|e| ScrapeError::Publish(format!("{e:#}")))?
            .len();

        info!(
            "Publishing {} ({local_size} bytes) to {}",
            local_path.display(),
            self.config.host
        );

        let config = self.config.clone();
        let path: PathBuf = local_path.to_path_buf();
        tokio::task::spawn_blocking(move || upload_and_verify(&config, &path, local_size))
            .await
            .map_err(|e| ScrapeError::Publish(format!("upload task join error: {e}")))?
            .map_err(|e| ScrapeError::Publish(format!("{e:#}")))
    }
}

/// Blocking FTP session: login, change directory, store, verify size.
fn upload_and_verify(config: &FtpConfig, local_path: &Path, local_size: u64) -> Result<()> {
    let address = if config.host.contains(':') {
        config.host.clone()
    } else {
        format!("{}:21", config.host)
    };

    let mut ftp = FtpStream::connect(&address)
        .with_context(|| format!("Failed to connect to {address}"))?;
    ftp.login(&config.user, &config.password)
        .context("FTP login failed")?;
    ftp.cwd(&config.remote_dir)
        .with_context(|| format!("Failed to change to remote dir {}", config.remote_dir))?;

    if let Ok(existing) = ftp.nlst(None) {
        debug!("Remote dir holds {} entries before upload", existing.len());
    }

    let mut file = File::open(local_path)
        .with_context(|| format!("Failed to open {}", local_path.display()))?;
    ftp.put_file(&config.remote_filename, &mut file)
        .with_context(|| format!("Failed to store {}", config.remote_filename))?;

    let remote_size = ftp
        .size(&config.remote_filename)
        .with_context(|| {
            format!(
                "Uploaded file {} not found on server",
                config.remote_filename
            )
        })? as u64;

    ftp.quit().ok();

    if remote_size != local_size {
        anyhow::bail!(
            "Size mismatch after upload: local {local_size} bytes, remote {remote_size} bytes"
        );
    }

    info!(
        "Upload verified: {} ({remote_size} bytes)",
        config.remote_filename
    );
    Ok(())
}
