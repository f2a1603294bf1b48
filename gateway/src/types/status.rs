//! 稼働状況型定義
//!
//! UIへ返す4種類のステータスラベル

use crate::health::schedule::SCHEDULE_WINDOW;
use serde::{Deserialize, Serialize};
use std::fmt;

/// スケジュール窓内でバックエンドに届かない場合の推定時間
pub const ESTIMATE_IMMEDIATE: &str = "immediate";

/// バックエンドの稼働状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceState {
    /// リクエスト受付中
    Active,
    /// 起動中（ウォームアップ中と推定）
    Processing,
    /// 稼働予定時間外
    Scheduled,
    /// 停止中
    Inactive,
}

impl ServiceState {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Processing => "Processing",
            Self::Scheduled => "Scheduled",
            Self::Inactive => "Inactive",
        }
    }

    /// バックエンドが報告した状態文字列を正規化する
    ///
    /// 大文字小文字は区別しない。未知の値は `None`。
    pub fn from_backend(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "processing" => Some(Self::Processing),
            "scheduled" => Some(Self::Scheduled),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1回のポーリング結果
///
/// 構築後に変更しない値オブジェクト。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    /// 稼働状態
    pub status: ServiceState,
    /// キュー内の位置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<u32>,
    /// 推定待ち時間
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

impl QueueStatus {
    /// 付加情報なしのステータスを作成
    pub fn new(status: ServiceState) -> Self {
        Self {
            status,
            queue_position: None,
            estimated_time: None,
        }
    }

    /// キュー位置を設定
    pub fn with_queue_position(mut self, position: Option<u32>) -> Self {
        self.queue_position = position;
        self
    }

    /// 推定待ち時間を設定
    pub fn with_estimated_time(mut self, estimate: Option<String>) -> Self {
        self.estimated_time = estimate;
        self
    }

    /// 窓内フォールバック: 起動中、即時利用可能見込み
    pub fn warming_up() -> Self {
        Self::new(ServiceState::Processing).with_estimated_time(Some(ESTIMATE_IMMEDIATE.to_string()))
    }

    /// 利用者向け表示メッセージ
    pub fn message(&self) -> String {
        match self.status {
            ServiceState::Active => match &self.estimated_time {
                Some(estimate) => format!("Ready in approximately {}", estimate),
                None => "Ready for your LinkedIn post request".to_string(),
            },
            ServiceState::Processing => "System is initializing...".to_string(),
            ServiceState::Scheduled => format!("Available on {}", SCHEDULE_WINDOW.describe()),
            ServiceState::Inactive => "Service currently unavailable".to_string(),
        }
    }
}
