//! Retry-policy tests for the signed-header capture loop
//!
//! These drive `run_capture_attempts` with mock attempt futures under paused
//! time, so attempt counts and backoff sleeps are exact and the tests run
//! without a browser.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use trendtok::auth::{AuthParams, run_capture_attempts};
use trendtok::error::ScrapeError;

fn params(tag: &str) -> AuthParams {
    AuthParams {
        timestamp: "1718000000".to_string(),
        user_sign: tag.to_string(),
        anonymous_user_id: String::new(),
    }
}

const BACKOFF: Duration = Duration::from_secs(3);

#[tokio::test(start_paused = true)]
async fn first_attempt_success_runs_one_attempt_and_no_backoff() {
    let calls = Arc::new(AtomicU32::new(0));
    let start = tokio::time::Instant::now();

    let result = run_capture_attempts(5, BACKOFF, |attempt| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(params(&attempt.to_string())))
        }
    })
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.user_sign, "1");
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn success_on_attempt_three_stops_after_three_attempts() {
    let calls = Arc::new(AtomicU32::new(0));
    let start = tokio::time::Instant::now();

    let result = run_capture_attempts(5, BACKOFF, |attempt| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            if attempt == 3 {
                Ok(Some(params("attempt-3")))
            } else {
                Ok(None)
            }
        }
    })
    .await
    .unwrap();

    // Exactly 3 attempts, 2 backoff sleeps, and the attempt-3 params.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(result.user_sign, "attempt-3");
    assert_eq!(start.elapsed(), BACKOFF * 2);
}

#[tokio::test(start_paused = true)]
async fn exhaustion_runs_max_attempts_and_max_minus_one_backoffs() {
    let calls = Arc::new(AtomicU32::new(0));
    let start = tokio::time::Instant::now();

    let err = run_capture_attempts(5, BACKOFF, |_| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    })
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(start.elapsed(), BACKOFF * 4);
    assert!(matches!(err, ScrapeError::AuthFailed { attempts: 5 }));
}

#[tokio::test(start_paused = true)]
async fn attempt_errors_are_absorbed_by_the_loop() {
    let calls = Arc::new(AtomicU32::new(0));

    let result = run_capture_attempts(5, BACKOFF, |attempt| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            if attempt < 3 {
                Err(anyhow::anyhow!("session crashed"))
            } else {
                Ok(Some(params("recovered")))
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(result.user_sign, "recovered");
}

#[tokio::test(start_paused = true)]
async fn single_attempt_budget_never_sleeps() {
    let start = tokio::time::Instant::now();

    let err = run_capture_attempts(1, BACKOFF, |_| async { Ok(None) })
        .await
        .unwrap_err();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(matches!(err, ScrapeError::AuthFailed { attempts: 1 }));
}
