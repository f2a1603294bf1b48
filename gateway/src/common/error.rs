//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! ステータス確認・URL解決の失敗はエラーとして表面化しない。
//! 利用者に見えるのは生成リクエストの失敗のみ。

use axum::http::StatusCode;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Gateway error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// The backend answered with a non-success status
    #[error("API error: {}", .status.as_u16())]
    UpstreamStatus {
        /// Status code returned by the backend
        status: StatusCode,
        /// Raw response body returned by the backend
        details: String,
    },

    /// Generation failed locally (bad request body, network error, bad upstream body)
    #[error("Generation failed: {0}")]
    Generation(String),
}

impl GatewayError {
    /// Returns a safe error message for external clients.
    ///
    /// Internal details (backend address, transport errors) stay in the server logs.
    pub fn external_message(&self) -> String {
        match self {
            Self::UpstreamStatus { status, .. } => format!("API error: {}", status.as_u16()),
            Self::Common(_) | Self::Generation(_) => "Failed to generate post".to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamStatus { status, .. } => *status,
            Self::Common(_) | Self::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (Gateway)
pub type GatewayResult<T> = Result<T, GatewayError>;
