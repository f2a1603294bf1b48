//! 稼働状況推定器
//!
//! プル型ヘルスプローブでバックエンドの稼働状況を4状態に分類する

use super::schedule::{Clock, SystemClock, SCHEDULE_WINDOW};
use crate::common::protocol::BackendStatusResponse;
use crate::resolver::EndpointResolver;
use crate::types::{QueueStatus, ServiceState};
use chrono::NaiveDateTime;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// 稼働状況推定器
///
/// ヘルスプローブが応答すればそれを正とし、応答しなければスケジュール窓で推定する。
/// エラーを呼び出し元へ返すことはない。
#[derive(Clone)]
pub struct AvailabilityEstimator {
    /// バックエンドURLリゾルバー
    resolver: EndpointResolver,
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
    /// 現在時刻の取得元
    clock: Arc<dyn Clock>,
}

impl AvailabilityEstimator {
    /// 新しい推定器を作成（ローカル時刻を使用）
    pub fn new(resolver: EndpointResolver, client: Client) -> Self {
        Self {
            resolver,
            client,
            clock: Arc::new(SystemClock),
        }
    }

    /// 時刻の取得元を差し替える
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 現在の稼働状況
    pub async fn status(&self) -> QueueStatus {
        self.status_at(self.clock.now()).await
    }

    /// 指定時刻を基準にした稼働状況
    ///
    /// `now` はプローブ失敗時のスケジュール判定にのみ使う。
    pub async fn status_at(&self, now: NaiveDateTime) -> QueueStatus {
        let base_url = self.resolver.resolve().await;

        match self.probe(&base_url).await {
            Ok(body) => map_backend_status(body),
            Err(e) => {
                let fallback = schedule_fallback(now);
                debug!(
                    base_url = %base_url,
                    error = %e,
                    fallback = %fallback.status,
                    "Health probe unavailable, using schedule heuristic"
                );
                fallback
            }
        }
    }

    /// バックエンドが2xxで応答するか
    pub async fn is_available(&self) -> bool {
        let base_url = self.resolver.resolve().await;
        match self.client.get(status_url(&base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(base_url = %base_url, error = %e, "API availability check failed");
                false
            }
        }
    }

    async fn probe(
        &self,
        base_url: &str,
    ) -> Result<BackendStatusResponse, Box<dyn std::error::Error + Send + Sync>> {
        let start = Instant::now();
        let response = self.client.get(status_url(base_url)).send().await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()).into());
        }

        let bytes = response.bytes().await?;
        let body: BackendStatusResponse = serde_json::from_slice(&bytes)?;

        debug!(
            base_url = %base_url,
            latency_ms = latency_ms,
            status = ?body.status,
            "Health probe succeeded"
        );
        Ok(body)
    }
}

fn status_url(base_url: &str) -> String {
    format!("{}/status", base_url.trim_end_matches('/'))
}

/// バックエンドの応答を正規のステータスへ変換
fn map_backend_status(body: BackendStatusResponse) -> QueueStatus {
    let state = body
        .status
        .as_deref()
        .and_then(ServiceState::from_backend)
        .unwrap_or(ServiceState::Inactive);

    QueueStatus::new(state)
        .with_queue_position(body.queue_position)
        .with_estimated_time(body.estimated_time)
}

/// プローブ失敗時のスケジュール判定
fn schedule_fallback(now: NaiveDateTime) -> QueueStatus {
    if SCHEDULE_WINDOW.contains(&now) {
        QueueStatus::warming_up()
    } else {
        QueueStatus::new(ServiceState::Scheduled)
    }
}
