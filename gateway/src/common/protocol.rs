//! 通信プロトコル定義
//!
//! ルックアップサービス・推論バックエンドとの間でやり取りするJSON

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 生成リクエストで `tone` が省略された場合の既定値
pub const DEFAULT_TONE: &str = "professional";

/// 生成リクエストで `length` が省略された場合の既定値
pub const DEFAULT_LENGTH: &str = "medium";

/// ルックアップサービスの応答 (`GET {lookup_url}`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LookupResponse {
    /// 現在のバックエンドURL
    #[serde(rename = "apiUrl", default)]
    pub api_url: Option<String>,
}

/// バックエンドのヘルス応答 (`GET {base}/status`)
///
/// 各フィールドは寛容に読み取る。型が合わない値は `None` になり、
/// 応答全体が解析失敗として扱われることはない。
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BackendStatusResponse {
    /// バックエンド自身が報告する状態
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// キュー内の位置
    #[serde(default, deserialize_with = "lenient_queue_position")]
    pub queue_position: Option<u32>,
    /// 推定待ち時間
    #[serde(default, deserialize_with = "lenient_estimate")]
    pub estimated_time: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// 整数値の浮動小数（`2.0`）も受け付ける。負数・範囲外・非整数は `None`。
fn lenient_queue_position<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let position = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        _ => None,
    };
    Ok(position)
}

/// 数値は文字列表現で保持する。
fn lenient_estimate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// UIから受け取る生成リクエスト (`POST /api/generate`)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    /// 投稿のトピック
    pub topic: String,
    /// 文体
    #[serde(default)]
    pub tone: Option<String>,
    /// 長さ
    #[serde(default)]
    pub length: Option<String>,
    /// 利用者のメールアドレス
    #[serde(default)]
    pub email: Option<String>,
}

/// バックエンドへ転送する生成リクエスト (`POST {base}/generate`)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpstreamGenerateRequest {
    /// 投稿のトピック
    pub topic: String,
    /// 文体（既定値適用済み）
    pub tone: String,
    /// 長さ（既定値適用済み）
    pub length: String,
    /// 利用者のメールアドレス
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<GenerateRequest> for UpstreamGenerateRequest {
    fn from(req: GenerateRequest) -> Self {
        Self {
            topic: req.topic,
            tone: non_empty_or(req.tone, DEFAULT_TONE),
            length: non_empty_or(req.length, DEFAULT_LENGTH),
            email: req.email,
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// バックエンドの生成応答
///
/// `generated_text` を持たない2xx応答は生成失敗として扱う。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    /// 生成テキスト
    pub generated_text: String,
    /// 処理時間（秒）
    #[serde(
        default,
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_time: Option<f64>,
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    })
}
