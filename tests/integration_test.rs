//! Integration tests for the profile_check pipeline.
//!
//! These tests drive `analyze_profile()` through the public API with a
//! context built by `init_profile_context()`, a mock proxy served by
//! `httptest` and a file-backed error log in a temporary directory. They do
//! not make real network requests.

use std::path::Path;

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use profile_check::error_log::{ErrorEntry, ErrorLog, FileErrorLog};
use profile_check::initialization::init_profile_context;
use profile_check::validation::Platform;
use profile_check::{analyze_profile, Config, ProfileError};

/// Config pointing at `proxy_url` with an instant analyzer and 1ms backoff.
fn test_config(
    proxy_url: String,
    error_log: &Path,
    failure_rate: f64,
    max_retries: u32,
) -> Config {
    Config {
        proxy_url,
        error_log: error_log.to_path_buf(),
        probe_timeout_ms: 2000,
        max_retries,
        base_delay_ms: 1,
        analysis_latency_ms: 0,
        failure_rate,
        seed: Some(42),
        ..Default::default()
    }
}

fn proxy_url(server: &Server) -> String {
    format!("http://{}", server.addr())
}

#[tokio::test]
async fn test_successful_analysis_leaves_error_log_untouched() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/raw"),
            request::query(url_decoded(contains(("url", "https://github.com/octocat")))),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errors.json");
    let ctx = init_profile_context(&test_config(proxy_url(&server), &log_path, 0.0, 3)).unwrap();

    let report = analyze_profile(
        &ctx,
        " github.com/octocat ",
        Some("backend"),
        &CancellationToken::new(),
    )
    .await
    .expect("analysis should succeed");

    assert_eq!(report.normalized_url, "https://github.com/octocat");
    assert_eq!(report.platform, Platform::GitHub);
    assert!(report.accessibility.accessible);
    assert_eq!(report.accessibility.status, Some(200));
    assert_eq!(report.retry_count, 0);
    assert!(report.scores.overall <= 100);
    assert!(report
        .scores
        .recommendations
        .iter()
        .any(|r| r.contains("backend")));
    assert!(!log_path.exists(), "no error should have been tracked");
}

#[tokio::test]
async fn test_exhausted_retries_are_persisted_once() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/raw"))
            .times(3)
            .respond_with(status_code(200)),
    );
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errors.json");
    let ctx = init_profile_context(&test_config(proxy_url(&server), &log_path, 1.0, 2)).unwrap();

    let err = analyze_profile(&ctx, "medium.com/@jane", None, &CancellationToken::new())
        .await
        .expect_err("every attempt fails");

    assert!(matches!(err, ProfileError::Operation(_)));
    assert_eq!(
        err.to_string(),
        "Analysis of https://medium.com/@jane failed"
    );

    let entries = FileErrorLog::new(&log_path).get_all();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.message, "Analysis of https://medium.com/@jane failed");
    assert_eq!(
        entry.stack.as_deref(),
        Some("analysis temporarily unavailable: analysis service did not respond")
    );
    assert_eq!(entry.context.as_deref(), Some("analyze_profile"));
    assert_eq!(entry.url.as_deref(), Some("https://medium.com/@jane"));
    assert_eq!(entry.user_agent, Config::default().user_agent);
}

#[tokio::test]
async fn test_error_log_keeps_only_most_recent_entries() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/raw"))
            .times(..)
            .respond_with(status_code(200)),
    );
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errors.json");
    let ctx = init_profile_context(&test_config(proxy_url(&server), &log_path, 1.0, 0)).unwrap();

    // Pre-fill close to capacity so the pipeline's entries push the oldest out
    let log = FileErrorLog::new(&log_path);
    for i in 0..49 {
        log.track(ErrorEntry::new(&format!("old {i}"), "seed"));
    }

    for user in ["a", "b"] {
        let input = format!("dev.to/{user}");
        let _ = analyze_profile(&ctx, &input, None, &CancellationToken::new()).await;
    }

    let entries = log.get_all();
    assert_eq!(entries.len(), 50);
    assert_eq!(entries[0].message, "old 1");
    assert_eq!(entries[48].url.as_deref(), Some("https://dev.to/a"));
    assert_eq!(entries[49].url.as_deref(), Some("https://dev.to/b"));
}

#[tokio::test]
async fn test_unreachable_proxy_fails_open() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errors.json");
    // Nothing listens on port 1
    let ctx = init_profile_context(&test_config(
        "http://127.0.0.1:1".to_string(),
        &log_path,
        0.0,
        0,
    ))
    .unwrap();

    let report = analyze_profile(&ctx, "linkedin.com/in/jane", None, &CancellationToken::new())
        .await
        .expect("probe failures never block analysis");

    assert!(report.accessibility.accessible);
    assert_eq!(report.accessibility.status, None);
    assert_eq!(report.platform, Platform::LinkedIn);
}

#[tokio::test]
async fn test_invalid_input_makes_no_requests() {
    // Any request to this server fails the test when it is dropped
    let server = Server::run();
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errors.json");
    let ctx = init_profile_context(&test_config(proxy_url(&server), &log_path, 0.0, 3)).unwrap();

    let err = analyze_profile(&ctx, "localhost", None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileError::Validation(_)));
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_cancelled_before_start_tracks_nothing() {
    let server = Server::run();
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errors.json");
    let ctx = init_profile_context(&test_config(proxy_url(&server), &log_path, 1.0, 3)).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = analyze_profile(&ctx, "github.com/octocat", None, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileError::Cancelled));
    assert!(!log_path.exists());
}
