//! Signed-header capture from the creative-center page
//!
//! The trend-list API only answers requests carrying headers that the page's
//! own script computes in-browser (timing plus device fingerprint). The
//! values cannot be derived offline, so we watch them go past: launch an
//! isolated headless browser, subscribe to CDP `requestWillBeSent` events,
//! navigate to the page and pull the headers off the one request that
//! matches the trend-list path.
//!
//! Navigation and observation race. The signed request can fire before,
//! during or shortly after the page becomes interactive, and navigation
//! completion itself is irrelevant — only the side-effect network call
//! matters. Each attempt therefore waits on a one-shot capture channel with
//! a deadline, and the bounded retry loop absorbs transient failures (slow
//! script execution, anti-automation interstitials, network blips).

use anyhow::{Context, Result};
use chromiumoxide::cdp::browser_protocol::network::{EventRequestWillBeSent, Headers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, trace, warn};

use crate::browser_setup::BrowserSession;
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::constants::TREND_LIST_PATH;

/// The three captured header values that authorize trend-list calls.
///
/// Produced once per run; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub timestamp: String,
    pub user_sign: String,
    /// Absent on some sessions; the API accepts an empty value.
    pub anonymous_user_id: String,
}

impl AuthParams {
    /// Extract auth values from a CDP request-header object.
    ///
    /// Header names are matched case-insensitively; Chrome reports them as
    /// the page sent them. Returns `None` when `timestamp` or `user-sign`
    /// is missing, i.e. the matched request was not actually signed.
    #[must_use]
    pub fn from_request_headers(headers: &Headers) -> Option<Self> {
        let object = headers.inner().as_object()?;
        let get = |name: &str| {
            object
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_str())
                .map(str::to_string)
        };

        Some(Self {
            timestamp: get("timestamp")?,
            user_sign: get("user-sign")?,
            anonymous_user_id: get("anonymous-user-id").unwrap_or_default(),
        })
    }
}

/// Drives browser sessions until the signed headers are observed.
pub struct AuthInterceptor {
    user_agent: String,
    base_referer: String,
    max_attempts: u32,
    retry_backoff: Duration,
    capture_timeout: Duration,
}

impl AuthInterceptor {
    #[must_use]
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            user_agent: config.user_agent().to_string(),
            base_referer: config.base_referer().to_string(),
            max_attempts: config.max_auth_attempts(),
            retry_backoff: config.auth_retry_backoff(),
            capture_timeout: config.auth_capture_timeout(),
        }
    }

    /// Capture the signed headers, retrying with fresh browser sessions.
    ///
    /// Fatal only after `max_auth_attempts` sessions have come up empty;
    /// any attempt-local error is logged and absorbed by the loop.
    pub async fn acquire(&self) -> ScrapeResult<AuthParams> {
        run_capture_attempts(self.max_attempts, self.retry_backoff, |attempt| {
            self.run_attempt(attempt)
        })
        .await
    }

    /// One isolated session: launch, observe, race, tear down.
    ///
    /// `Ok(None)` means the deadline passed without a capture. The session
    /// is shut down on every path before the result is returned.
    async fn run_attempt(&self, attempt: u32) -> Result<Option<AuthParams>> {
        let user_data_dir = std::env::temp_dir().join(format!(
            "trendtok_chrome_{}_{attempt}",
            std::process::id()
        ));
        let session = BrowserSession::launch(&self.user_agent, user_data_dir).await?;
        with_session_scope(
            session,
            async |session| self.capture_from_session(session).await,
            async |session| session.shutdown().await,
        )
        .await
    }

    async fn capture_from_session(
        &self,
        session: &BrowserSession,
    ) -> Result<Option<AuthParams>> {
        let page = session.new_blank_page().await?;

        let mut events = page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .context("Failed to register network request listener")?;

        // Single-assignment slot: the listener resolves the channel at most
        // once, then stops scanning.
        let (params_tx, params_rx) = oneshot::channel::<AuthParams>();
        let listener = tokio::spawn(async move {
            let mut slot = Some(params_tx);
            while let Some(event) = events.next().await {
                if !event.request.url.contains(TREND_LIST_PATH) {
                    continue;
                }
                trace!("Observed trend-list request: {}", event.request.url);
                if let Some(params) = AuthParams::from_request_headers(&event.request.headers) {
                    if let Some(tx) = slot.take() {
                        let _ = tx.send(params);
                    }
                    break;
                }
                debug!("Trend-list request without signed headers, still watching");
            }
        });

        // Navigation runs as its own task; we never wait for it directly.
        let referer = self.base_referer.clone();
        let nav_page = page.clone();
        let navigation =
            tokio::spawn(async move { nav_page.goto(referer.as_str()).await.map(|_| ()) });

        let outcome = match timeout(self.capture_timeout, params_rx).await {
            Ok(Ok(params)) => {
                // Join navigation so it isn't left dangling. Whatever it
                // returns no longer matters - we already have the headers.
                if let Ok(Err(e)) = navigation.await {
                    trace!("Navigation finished with error after capture: {e}");
                }
                Ok(Some(params))
            }
            Ok(Err(_)) => {
                // Listener ended without sending: event stream closed early.
                drop(navigation);
                Ok(None)
            }
            Err(_) => {
                // Deadline passed. The navigation task is not cancelled here;
                // session shutdown discards it along with the page.
                drop(navigation);
                Ok(None)
            }
        };

        listener.abort();
        outcome
    }
}

/// Scoped session use: run `work` against the session, then always tear the
/// session down before surfacing the result — on capture, on timeout and on
/// error alike.
pub(crate) async fn with_session_scope<S, T>(
    session: S,
    work: impl AsyncFnOnce(&S) -> Result<T>,
    teardown: impl AsyncFnOnce(S),
) -> Result<T> {
    let result = work(&session).await;
    teardown(session).await;
    result
}

/// Bounded retry loop around a per-attempt capture future.
///
/// Factored out of [`AuthInterceptor::acquire`] so the retry policy can be
/// exercised without a browser: success on attempt `k` returns immediately
/// after `k` attempts and `k - 1` backoff sleeps; exhaustion takes exactly
/// `max_attempts` attempts and `max_attempts - 1` sleeps.
pub async fn run_capture_attempts<F, Fut>(
    max_attempts: u32,
    backoff: Duration,
    mut attempt_fn: F,
) -> ScrapeResult<AuthParams>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<AuthParams>>>,
{
    for attempt in 1..=max_attempts {
        info!("Auth capture attempt {attempt} of {max_attempts}");
        match attempt_fn(attempt).await {
            Ok(Some(params)) => {
                info!("Signed headers captured on attempt {attempt}");
                return Ok(params);
            }
            Ok(None) => {
                warn!("Attempt {attempt}: no signed request observed before deadline");
            }
            Err(e) => {
                warn!("Attempt {attempt} failed: {e:#}");
            }
        }
        if attempt < max_attempts {
            debug!("Backing off {backoff:?} before next attempt");
            sleep(backoff).await;
        }
    }
    Err(ScrapeError::AuthFailed {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers_from(value: serde_json::Value) -> Headers {
        serde_json::from_value(value).expect("header object")
    }

    #[test]
    fn extracts_all_three_headers() {
        let headers = headers_from(json!({
            "timestamp": "1718000000",
            "user-sign": "abc123",
            "anonymous-user-id": "7345-xyz",
        }));
        let params = AuthParams::from_request_headers(&headers).unwrap();
        assert_eq!(params.timestamp, "1718000000");
        assert_eq!(params.user_sign, "abc123");
        assert_eq!(params.anonymous_user_id, "7345-xyz");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let headers = headers_from(json!({
            "Timestamp": "1718000000",
            "User-Sign": "abc123",
            "Anonymous-User-Id": "7345-xyz",
        }));
        let params = AuthParams::from_request_headers(&headers).unwrap();
        assert_eq!(params.user_sign, "abc123");
    }

    #[test]
    fn missing_anonymous_id_defaults_to_empty() {
        let headers = headers_from(json!({
            "timestamp": "1718000000",
            "user-sign": "abc123",
        }));
        let params = AuthParams::from_request_headers(&headers).unwrap();
        assert_eq!(params.anonymous_user_id, "");
    }

    #[test]
    fn unsigned_request_yields_none() {
        let headers = headers_from(json!({
            "accept": "application/json",
            "timestamp": "1718000000",
        }));
        assert!(AuthParams::from_request_headers(&headers).is_none());
    }

    mod session_scope {
        use super::super::*;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU32, Ordering};

        /// Counting stand-in for a browser session; teardown consumes it,
        /// mirroring `BrowserSession::shutdown`.
        struct FakeSession {
            teardowns: Arc<AtomicU32>,
        }

        impl FakeSession {
            fn new(teardowns: &Arc<AtomicU32>) -> Self {
                Self {
                    teardowns: teardowns.clone(),
                }
            }

            async fn shutdown(self) {
                self.teardowns.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn params() -> AuthParams {
            AuthParams {
                timestamp: "1718000000".to_string(),
                user_sign: "sig".to_string(),
                anonymous_user_id: String::new(),
            }
        }

        #[tokio::test]
        async fn tears_down_after_capture() {
            let teardowns = Arc::new(AtomicU32::new(0));
            let result = with_session_scope(
                FakeSession::new(&teardowns),
                async |_| Ok(Some(params())),
                async |session| session.shutdown().await,
            )
            .await;

            assert_eq!(teardowns.load(Ordering::SeqCst), 1);
            assert_eq!(result.unwrap(), Some(params()));
        }

        #[tokio::test]
        async fn tears_down_after_deadline_miss() {
            let teardowns = Arc::new(AtomicU32::new(0));
            let result: Result<Option<AuthParams>> = with_session_scope(
                FakeSession::new(&teardowns),
                async |_| Ok(None),
                async |session| session.shutdown().await,
            )
            .await;

            assert_eq!(teardowns.load(Ordering::SeqCst), 1);
            assert!(result.unwrap().is_none());
        }

        #[tokio::test]
        async fn tears_down_when_the_attempt_errors() {
            let teardowns = Arc::new(AtomicU32::new(0));
            let result: Result<Option<AuthParams>> = with_session_scope(
                FakeSession::new(&teardowns),
                async |_| Err(anyhow::anyhow!("session crashed")),
                async |session| session.shutdown().await,
            )
            .await;

            assert_eq!(teardowns.load(Ordering::SeqCst), 1);
            assert!(result.is_err());
        }
    }
}
