//! Integration Test: エンドポイントリゾルバー
//!
//! ルックアップサービスの応答に応じたキャッシュURLの更新・維持を検証する。

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::gateway::{create_test_resolver, FALLBACK_URL, UNREACHABLE_URL};

async fn lookup_server() -> MockServer {
    MockServer::start().await
}

fn lookup_url(server: &MockServer) -> String {
    format!("{}/exec", server.uri())
}

/// 新しいapiUrlは次回以降も保持される
#[tokio::test]
async fn test_new_api_url_is_returned_and_persists() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"apiUrl": "https://fresh.ngrok-free.app"})),
        )
        .up_to_n_times(1)
        .mount(&lookup)
        .await;
    // 以降はapiUrlなし
    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);

    assert_eq!(resolver.resolve().await, "https://fresh.ngrok-free.app");
    assert_eq!(resolver.resolve().await, "https://fresh.ngrok-free.app");
    assert_eq!(resolver.current(), "https://fresh.ngrok-free.app");
}

/// 再度変更されるまで最新のapiUrlを保持する
#[tokio::test]
async fn test_second_change_replaces_first_and_persists() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"apiUrl": "https://first.ngrok-free.app"})),
        )
        .up_to_n_times(1)
        .mount(&lookup)
        .await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"apiUrl": "https://second.ngrok-free.app"})),
        )
        .up_to_n_times(1)
        .mount(&lookup)
        .await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);

    assert_eq!(resolver.resolve().await, "https://first.ngrok-free.app");
    assert_eq!(resolver.resolve().await, "https://second.ngrok-free.app");
    assert_eq!(resolver.resolve().await, "https://second.ngrok-free.app");
    assert_eq!(resolver.resolve().await, "https://second.ngrok-free.app");
    assert_eq!(resolver.current(), "https://second.ngrok-free.app");
}

/// apiUrlが欠けている場合はキャッシュを変更しない
#[tokio::test]
async fn test_missing_api_url_keeps_cached_value() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);

    assert_eq!(resolver.resolve().await, FALLBACK_URL);
    assert_eq!(resolver.current(), FALLBACK_URL);
}

/// 同じapiUrlが返る場合は冪等
#[tokio::test]
async fn test_unchanged_api_url_is_idempotent() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"apiUrl": FALLBACK_URL})))
        .expect(2)
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);

    let first = resolver.resolve().await;
    let second = resolver.resolve().await;
    assert_eq!(first, FALLBACK_URL);
    assert_eq!(first, second);
}

/// 空文字列・相対URLは無視する
#[tokio::test]
async fn test_invalid_api_url_is_ignored() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"apiUrl": "not a url"})))
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);
    assert_eq!(resolver.resolve().await, FALLBACK_URL);
}

/// HTTP 500 はフォールバック値を返す
#[tokio::test]
async fn test_lookup_server_error_returns_cached_value() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"apiUrl": "https://ignored.example.com"})),
        )
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);
    assert_eq!(resolver.resolve().await, FALLBACK_URL);
}

/// 不正なJSONはフォールバック値を返す
#[tokio::test]
async fn test_lookup_malformed_json_returns_cached_value() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);
    assert_eq!(resolver.resolve().await, FALLBACK_URL);
}

/// タイムアウトはフォールバック値を返す
#[tokio::test]
async fn test_lookup_timeout_returns_cached_value() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"apiUrl": "https://late.ngrok-free.app"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);
    assert_eq!(resolver.resolve().await, FALLBACK_URL);
}

/// 到達不能な場合はフォールバック値を返す
#[tokio::test]
async fn test_unreachable_lookup_returns_fallback() {
    let resolver = create_test_resolver(UNREACHABLE_URL, FALLBACK_URL);
    assert_eq!(resolver.resolve().await, FALLBACK_URL);
}

/// 解決後に失敗した場合はフォールバックではなく最後に解決したURLを返す
#[tokio::test]
async fn test_failure_after_success_returns_last_resolved() {
    let lookup = lookup_server().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"apiUrl": "https://second.ngrok-free.app"})),
        )
        .up_to_n_times(1)
        .mount(&lookup)
        .await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&lookup)
        .await;

    let resolver = create_test_resolver(&lookup_url(&lookup), FALLBACK_URL);

    assert_eq!(resolver.resolve().await, "https://second.ngrok-free.app");
    assert_eq!(resolver.resolve().await, "https://second.ngrok-free.app");
}
