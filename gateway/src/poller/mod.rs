//! 定期ステータスポーリング
//!
//! UIの30秒ポーリングに相当するキャンセル可能な周期タスク。
//! 最初の応答が届く前は `Processing` を公開し、一瞬 `Active` が見えることを防ぐ。

use crate::health::AvailabilityEstimator;
use crate::shutdown::ShutdownController;
use crate::types::{QueueStatus, ServiceState};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// デフォルトのポーリング間隔（秒）
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// ステータスの取得元
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// 現在のステータスを取得する（失敗しない）
    async fn fetch_status(&self) -> QueueStatus;
}

#[async_trait]
impl StatusSource for AvailabilityEstimator {
    async fn fetch_status(&self) -> QueueStatus {
        self.status().await
    }
}

/// 稼働中ゲートウェイの `GET /api/status` を取得元とする
#[derive(Debug, Clone)]
pub struct RemoteStatusSource {
    client: Client,
    status_url: String,
}

impl RemoteStatusSource {
    /// ゲートウェイのベースURLから作成
    pub fn new(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            status_url: format!("{}/api/status", gateway_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl StatusSource for RemoteStatusSource {
    async fn fetch_status(&self) -> QueueStatus {
        let response = match self.client.get(&self.status_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %self.status_url, error = %e, "Error fetching status");
                return QueueStatus::new(ServiceState::Inactive);
            }
        };

        if !response.status().is_success() {
            warn!(
                url = %self.status_url,
                status = %response.status(),
                "Status API returned error"
            );
            return QueueStatus::new(ServiceState::Inactive);
        }

        match response.json::<QueueStatus>().await {
            Ok(status) => status,
            Err(e) => {
                warn!(url = %self.status_url, error = %e, "Malformed status response");
                QueueStatus::new(ServiceState::Inactive)
            }
        }
    }
}

/// ステータスポーラー
///
/// `stop()` でタイマーごと確実に停止する。
pub struct StatusPoller {
    receiver: watch::Receiver<QueueStatus>,
    shutdown: ShutdownController,
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// バックグラウンドでポーリングを開始
    pub fn spawn(source: Arc<dyn StatusSource>, period: Duration) -> Self {
        let (sender, receiver) = watch::channel(QueueStatus::new(ServiceState::Processing));
        let shutdown = ShutdownController::default();
        let handle = tokio::spawn(poll_loop(source, period, sender, shutdown.clone()));

        Self {
            receiver,
            shutdown,
            handle,
        }
    }

    /// 最新のステータス
    pub fn latest(&self) -> QueueStatus {
        self.receiver.borrow().clone()
    }

    /// ステータス更新の購読
    pub fn subscribe(&self) -> watch::Receiver<QueueStatus> {
        self.receiver.clone()
    }

    /// ポーリングを停止し、タスクの終了を待つ
    pub async fn stop(self) {
        self.shutdown.request_shutdown();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Status poller task ended abnormally");
        }
    }
}

async fn poll_loop(
    source: Arc<dyn StatusSource>,
    period: Duration,
    sender: watch::Sender<QueueStatus>,
    shutdown: ShutdownController,
) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs = period.as_secs(), "Status poller started");

    loop {
        tokio::select! {
            _ = shutdown.wait() => break,
            _ = timer.tick() => {}
        }

        // 実行中のリクエストも停止要求で打ち切る
        let status = tokio::select! {
            _ = shutdown.wait() => break,
            status = source.fetch_status() => status,
        };

        let previous = sender.borrow().status;
        if previous != status.status {
            info!(from = %previous, to = %status.status, "Service status changed");
        } else {
            debug!(status = %status.status, "Service status unchanged");
        }
        sender.send_replace(status);
    }

    info!("Status poller stopped");
}
