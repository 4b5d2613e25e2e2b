//! Integration tests for the global loading indicator

use rollcall_http::client::ApiClient;
use rollcall_http::client::config::RequestConfig;
use rollcall_http::client::session::MemoryTokenStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_token(uri: &str, token: &str) -> ApiClient {
    ApiClient::builder()
        .base_url(uri)
        .token_store(Arc::new(MemoryTokenStore::with_token(token)))
        .build()
        .unwrap()
}

async fn mount_delayed(server: &MockServer, route: &str, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": [] }))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_indicator_stays_true_while_any_request_is_outstanding() {
    let server = MockServer::start().await;
    mount_delayed(&server, "/employee/all", 100).await;
    mount_delayed(&server, "/attendance", 300).await;

    let client = client_with_token(&server.uri(), "t-1");
    assert!(!client.loading().is_loading());

    let short = client.list_employees();
    let long = client.list_attendance();
    // Samples the indicator after the short request settles but before the
    // long one does; a boolean toggle would already read false here.
    let probe = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(client.loading().is_loading());
        assert_eq!(client.loading().in_flight(), 1);
    };

    let (short, long, ()) = futures::join!(short, long, probe);
    short.unwrap();
    long.unwrap();

    assert!(!client.loading().is_loading());
    assert_eq!(client.loading().in_flight(), 0);
}

#[tokio::test]
async fn test_skip_loading_requests_never_touch_the_indicator() {
    let server = MockServer::start().await;
    mount_delayed(&server, "/employee/all", 50).await;

    let client = client_with_token(&server.uri(), "t-1");
    let mut signal = client.loading().subscribe();

    let response = client
        .dispatch(RequestConfig::get("/employee/all").skip_loading())
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    assert!(!signal.has_changed().unwrap());
    assert!(!client.loading().is_loading());
}

#[tokio::test]
async fn test_indicator_settles_exactly_once_across_a_refresh_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/employee/all"))
        .and(wiremock::matchers::header("authorization", "Bearer t-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "accessToken": "t-2" }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/employee/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .mount(&server)
        .await;

    let client = client_with_token(&server.uri(), "t-1");

    let call = client.list_employees();
    // Mid-refresh the original request still counts as outstanding.
    let probe = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(client.loading().is_loading());
        assert_eq!(client.loading().in_flight(), 1);
    };

    let (result, ()) = futures::join!(call, probe);
    result.unwrap();

    // One request, one guard: the retry path must not double-settle.
    assert!(!client.loading().is_loading());
    assert_eq!(client.loading().in_flight(), 0);
}

#[tokio::test]
async fn test_indicator_signal_sees_rising_and_falling_edges() {
    let server = MockServer::start().await;
    mount_delayed(&server, "/attendance", 50).await;

    let client = client_with_token(&server.uri(), "t-1");
    let mut signal = client.loading().subscribe();

    let records = client.list_attendance();
    let edges = async {
        signal.changed().await.unwrap();
        let rising = *signal.borrow_and_update();
        signal.changed().await.unwrap();
        let falling = *signal.borrow_and_update();
        (rising, falling)
    };

    let (records, (rising, falling)) = futures::join!(records, edges);
    records.unwrap();
    assert!(rising);
    assert!(!falling);
}
