//! バックエンドURLリゾルバー
//!
//! 推論バックエンドのURLはセッションごとに変わり、外部のルックアップサービスで告知される。
//! 最後に解決できたURL（初回はフォールバック値）を保持し、解決失敗時はそれを返す。

use crate::common::error::{CommonError, CommonResult};
use crate::common::protocol::LookupResponse;
use reqwest::{Client, Url};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// 現在のバックエンドURLを保持するセル
///
/// 常に空でない絶対URLを保持する。書き込みは後勝ち。
#[derive(Debug, Clone)]
pub struct EndpointState {
    current_url: Arc<RwLock<String>>,
}

impl EndpointState {
    /// フォールバックURLで初期化
    pub fn new(fallback_url: impl Into<String>) -> CommonResult<Self> {
        let fallback_url = fallback_url.into();
        if !is_absolute_http_url(&fallback_url) {
            return Err(CommonError::Config(format!(
                "fallback API URL must be an absolute http(s) URL: {:?}",
                fallback_url
            )));
        }
        Ok(Self {
            current_url: Arc::new(RwLock::new(fallback_url)),
        })
    }

    /// 現在のURLを取得
    pub fn get(&self) -> String {
        match self.current_url.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 有効かつ異なるURLであれば置き換える
    ///
    /// 判定と置き換えは同じ書き込みロックの中で行う。
    pub fn try_set(&self, url: &str) -> UpdateOutcome {
        if !is_absolute_http_url(url) {
            return UpdateOutcome::Invalid;
        }
        let mut guard = match self.current_url.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *guard == url {
            return UpdateOutcome::Unchanged;
        }
        *guard = url.to_string();
        UpdateOutcome::Updated
    }
}

/// `EndpointState::try_set` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// URLを置き換えた
    Updated,
    /// 保持中のURLと同じ
    Unchanged,
    /// 絶対http(s) URLではない
    Invalid,
}

fn is_absolute_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// エンドポイントリゾルバー
///
/// 呼び出しごとにルックアップサービスへ1回問い合わせる（失敗のキャッシュ・バックオフなし）。
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    /// HTTPクライアント
    client: Client,
    /// ルックアップサービスのURL
    lookup_url: String,
    /// 解決済みURL
    state: EndpointState,
}

impl EndpointResolver {
    /// 新しいリゾルバーを作成
    pub fn new(client: Client, lookup_url: impl Into<String>, state: EndpointState) -> Self {
        Self {
            client,
            lookup_url: lookup_url.into(),
            state,
        }
    }

    /// ネットワークアクセスなしで現在のURLを返す
    pub fn current(&self) -> String {
        self.state.get()
    }

    /// 現在のバックエンドURLを解決する
    ///
    /// 失敗しない。ルックアップに失敗した場合は保持中のURLを返す。
    pub async fn resolve(&self) -> String {
        match self.lookup().await {
            Ok(Some(url)) => match self.state.try_set(&url) {
                UpdateOutcome::Updated => info!(api_url = %url, "Updated API URL"),
                UpdateOutcome::Unchanged => debug!(api_url = %url, "API URL unchanged"),
                UpdateOutcome::Invalid => {
                    warn!(api_url = %url, "Ignoring invalid API URL from lookup service")
                }
            },
            Ok(None) => {
                debug!("Lookup service returned no API URL");
            }
            Err(e) => {
                warn!(
                    lookup_url = %self.lookup_url,
                    error = %e,
                    "Failed to fetch current API URL"
                );
            }
        }

        self.state.get()
    }

    async fn lookup(&self) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let response = self.client.get(&self.lookup_url).send().await?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()).into());
        }
        let bytes = response.bytes().await?;
        let body: LookupResponse = serde_json::from_slice(&bytes)?;
        Ok(body.api_url.filter(|url| !url.is_empty()))
    }
}
