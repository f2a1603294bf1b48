//! Unagi Gateway Server
//!
//! 推論バックエンドの現在地を解決し、稼働状況と生成リクエストを中継するゲートウェイ

#![warn(missing_docs)]

/// 共通型定義（エラー・プロトコル）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 稼働状況推定（ヘルスプローブ + スケジュールフォールバック）
pub mod health;

/// バックエンドURLの動的解決
pub mod resolver;

/// 定期ステータスポーリング
pub mod poller;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// Shutdown controller (graceful exit, poller cancellation)
pub mod shutdown;

/// 型定義
pub mod types;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// バックエンドURLリゾルバー
    pub resolver: resolver::EndpointResolver,
    /// 稼働状況推定器
    pub estimator: health::AvailabilityEstimator,
    /// 生成リクエスト用HTTPクライアント（接続プーリング有効）
    pub http_client: reqwest::Client,
}

impl AppState {
    /// 設定からアプリケーション状態を構築する
    pub fn from_config(config: &config::GatewayConfig) -> Result<Self, common::error::CommonError> {
        let probe_client = reqwest::Client::builder()
            .timeout(config.probe_timeout)
            .build()
            .map_err(|e| common::error::CommonError::Config(e.to_string()))?;
        let http_client = reqwest::Client::builder()
            .timeout(config.generate_timeout)
            .build()
            .map_err(|e| common::error::CommonError::Config(e.to_string()))?;

        let resolver = resolver::EndpointResolver::new(
            probe_client.clone(),
            config.lookup_url.clone(),
            resolver::EndpointState::new(config.fallback_api_url.clone())?,
        );
        let estimator = health::AvailabilityEstimator::new(resolver.clone(), probe_client);

        Ok(Self {
            resolver,
            estimator,
            http_client,
        })
    }
}
