use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use unagi_gateway::health::{AvailabilityEstimator, FixedClock};
use unagi_gateway::resolver::{EndpointResolver, EndpointState};
use unagi_gateway::{api, AppState};

use super::http::{spawn_server, TestServer};

/// 何も待ち受けていないアドレス
#[allow(dead_code)]
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// テスト用のフォールバックURL
#[allow(dead_code)]
pub const FALLBACK_URL: &str = "https://fallback.ngrok-free.app";

/// 2024-06-02 は日曜日
#[allow(dead_code)]
pub fn sunday(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// 2024-06-03 は月曜日
#[allow(dead_code)]
pub fn monday(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// 短いタイムアウトのHTTPクライアント
pub fn test_client() -> Client {
    Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap()
}

/// テスト用のリゾルバーを作成する
pub fn create_test_resolver(lookup_url: &str, fallback_url: &str) -> EndpointResolver {
    EndpointResolver::new(
        test_client(),
        lookup_url,
        EndpointState::new(fallback_url).unwrap(),
    )
}

/// 固定時刻で動作するアプリケーション状態を作成する
pub fn create_test_state(lookup_url: &str, fallback_url: &str, now: NaiveDateTime) -> AppState {
    let resolver = create_test_resolver(lookup_url, fallback_url);
    let estimator = AvailabilityEstimator::new(resolver.clone(), test_client())
        .with_clock(Arc::new(FixedClock(now)));

    AppState {
        resolver,
        estimator,
        http_client: test_client(),
    }
}

/// ゲートウェイをテスト用に起動する
pub async fn spawn_test_gateway(
    lookup_url: &str,
    fallback_url: &str,
    now: NaiveDateTime,
) -> TestServer {
    let state = create_test_state(lookup_url, fallback_url, now);
    spawn_server(api::create_router(state)).await
}
