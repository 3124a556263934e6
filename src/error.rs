//! Crate-wide error type for the scrape pipeline.
//!
//! Only fatal failure classes appear here. Per-page fetch failures and
//! per-video extraction failures are absorbed locally (empty page, placeholder
//! record) and never surface as a `ScrapeError`.

use thiserror::Error;

/// Fatal errors a pipeline run can terminate with.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The interceptor exhausted all attempts without capturing signed headers.
    /// Nothing can be fetched without them, so the run halts here.
    #[error("failed to capture signed auth headers after {attempts} attempts")]
    AuthFailed { attempts: u32 },

    /// Network-level error outside the recoverable per-page path, such as a
    /// client that cannot be constructed at all. Browser and CDP errors do
    /// not appear here: they are attempt-local and absorbed by the
    /// interceptor's retry loop, surfacing only as `AuthFailed`.
    #[error("network error: {0}")]
    Network(String),

    /// The rendered artifact could not be written or is missing after write.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// FTP transfer failed or the uploaded copy does not match the local one.
    #[error("publish error: {0}")]
    Publish(String),

    /// Other errors.
    #[error("scrape error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn variants_render_their_class() {
        let err = ScrapeError::AuthFailed { attempts: 5 };
        assert_eq!(
            err.to_string(),
            "failed to capture signed auth headers after 5 attempts"
        );

        let err = ScrapeError::Network("client build failed".to_string());
        assert_eq!(err.to_string(), "network error: client build failed");

        let err = ScrapeError::Publish("size mismatch".to_string());
        assert_eq!(err.to_string(), "publish error: size mismatch");
    }

    #[test]
    fn anyhow_conversion_keeps_the_context_chain() {
        let source: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err: ScrapeError = source.context("building HTTP client").unwrap_err().into();

        let rendered = err.to_string();
        assert!(rendered.contains("building HTTP client"));
        assert!(rendered.contains("connection refused"));
    }
}
