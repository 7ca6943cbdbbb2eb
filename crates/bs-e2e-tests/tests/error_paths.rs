//! E2E tests for configuration and fetch failures and their exit codes.

mod helpers;

use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use bs_cli::CliError;
use bs_client::ConfigError;
use helpers::TestHarness;

/// Missing token exits 1 and never reaches the network.
#[tokio::test]
async fn e2e_search_missing_token_makes_no_request() {
    let mut h = TestHarness::for_search().await;
    h.unset("BETTERSTACK_TELEMETRY_API_TOKEN");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let (result, stdout) = h.bs_logs(&[]).await;
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.to_string(), "BETTERSTACK_TELEMETRY_API_TOKEN not set");
    assert!(stdout.is_empty());
}

/// Every missing SQL variable is named at once.
#[tokio::test]
async fn e2e_vercel_missing_credentials_listed_together() {
    let mut h = TestHarness::for_sql().await;
    h.unset("BETTERSTACK_QUERY_USERNAME");
    h.unset("BETTERSTACK_QUERY_PASSWORD");
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let (result, _) = h.bs_vercel_logs(&[]).await;
    match result.unwrap_err() {
        CliError::Config(ConfigError::Missing(vars)) => {
            assert_eq!(
                vars,
                vec![
                    "BETTERSTACK_QUERY_USERNAME".to_string(),
                    "BETTERSTACK_QUERY_PASSWORD".to_string()
                ]
            );
        }
        other => panic!("expected missing config, got {other:?}"),
    }
}

/// A table prefix that is not a plain identifier is refused before any SQL is sent.
#[tokio::test]
async fn e2e_vercel_rejects_unsafe_prefix() {
    let mut h = TestHarness::for_sql().await;
    h.set("BETTERSTACK_TABLE_PREFIX_PRODUCTION", "t1; DROP TABLE x");
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let (result, _) = h.bs_vercel_logs(&[]).await;
    assert_eq!(result.unwrap_err().exit_code(), 1);
}

/// An HTTP error status exits 2 and carries the status code.
#[tokio::test]
async fn e2e_search_unauthorized_exits_2() {
    let h = TestHarness::for_search().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&h.server)
        .await;

    let (result, stdout) = h.bs_logs(&[]).await;
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("401"), "got {err}");
    assert!(stdout.is_empty());
}

/// A malformed NDJSON line exits 2 with no partial output.
#[tokio::test]
async fn e2e_vercel_malformed_body_exits_2() {
    let h = TestHarness::for_sql().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"dt\":\"x\"}\nnot json\n"))
        .mount(&h.server)
        .await;

    let (result, stdout) = h.bs_vercel_logs(&[]).await;
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("line 2"), "got {err}");
    assert!(stdout.is_empty());
}

/// A non-JSON search body is a decode failure.
#[tokio::test]
async fn e2e_search_malformed_body_exits_2() {
    let h = TestHarness::for_search().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&h.server)
        .await;

    let (result, _) = h.bs_logs(&[]).await;
    assert_eq!(result.unwrap_err().exit_code(), 2);
}

/// A refused connection surfaces as a fetch failure.
#[tokio::test]
async fn e2e_unreachable_host_exits_2() {
    let mut h = TestHarness::for_sql().await;
    h.set("BETTERSTACK_QUERY_HOST", "http://127.0.0.1:1");

    let (result, _) = h.bs_vercel_logs(&[]).await;
    assert_eq!(result.unwrap_err().exit_code(), 2);
}

/// `--man` needs no configuration at all.
#[tokio::test]
async fn e2e_man_pages_need_no_config() {
    let h = TestHarness::empty().await;

    let (result, stdout) = h.bs_logs(&["--man"]).await;
    result.unwrap();
    assert!(stdout.contains("BETTERSTACK_TELEMETRY_API_TOKEN"));

    let (result, stdout) = h.bs_vercel_logs(&["--man"]).await;
    result.unwrap();
    assert!(stdout.contains("--status-class"));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}
