//! ステータスAPIハンドラー

use crate::{types::QueueStatus, AppState};
use axum::{extract::State, Json};

/// GET /api/status - 稼働状況
///
/// 上流に到達できなくても常に200を返す。
pub async fn get_status(State(state): State<AppState>) -> Json<QueueStatus> {
    Json(state.estimator.status().await)
}
