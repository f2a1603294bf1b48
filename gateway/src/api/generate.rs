//! 生成プロキシ APIハンドラー
//!
//! UIからの生成リクエストを解決済みバックエンドの `/generate` へ転送する。
//! 利用者に失敗が見えるのはこの経路だけ。

use crate::api::error::AppError;
use crate::common::error::{CommonError, GatewayError, GatewayResult};
use crate::common::protocol::{GenerateRequest, GenerateResponse, UpstreamGenerateRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

/// POST /api/generate - 生成APIプロキシ
pub async fn proxy_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload.map_err(|e| GatewayError::Generation(e.body_text()))?;
    let body = forward_generate(&state, req.into()).await?;
    Ok(Json(body))
}

async fn forward_generate(
    state: &AppState,
    req: UpstreamGenerateRequest,
) -> GatewayResult<Value> {
    let base_url = state.resolver.resolve().await;
    let url = format!("{}/generate", base_url.trim_end_matches('/'));
    let start = Instant::now();

    let response = state
        .http_client
        .post(&url)
        .json(&req)
        .send()
        .await
        .map_err(|e| GatewayError::Generation(format!("Failed to proxy generate request: {}", e)))?;

    let upstream_status = response.status();
    if !upstream_status.is_success() {
        let details = response.text().await.unwrap_or_default();
        warn!(
            url = %url,
            status = %upstream_status,
            "Backend returned error for generate request"
        );
        return Err(GatewayError::UpstreamStatus {
            status: StatusCode::from_u16(upstream_status.as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            details,
        });
    }

    let body = response
        .json::<Value>()
        .await
        .map_err(|e| GatewayError::Generation(format!("Failed to parse generate response: {}", e)))?;

    // 本文はそのまま返すが、generated_text を欠く応答は失敗とする
    let generated = GenerateResponse::deserialize(&body).map_err(CommonError::from)?;

    info!(
        tone = %req.tone,
        length = %req.length,
        elapsed_ms = start.elapsed().as_millis() as u64,
        processing_time = ?generated.processing_time,
        "Generate request completed"
    );
    Ok(body)
}
