//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::GatewayError;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub GatewayError);

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        let message = self.0.external_message();

        // 上流の本文はUIにそのまま表示するため返す。それ以外の詳細はログのみ。
        let payload = match &self.0 {
            GatewayError::UpstreamStatus { details, .. } => json!({
                "error": message,
                "details": details,
            }),
            _ => {
                tracing::error!(error = %self.0, "Error generating post");
                json!({ "error": message })
            }
        };

        (status, Json(payload)).into_response()
    }
}
