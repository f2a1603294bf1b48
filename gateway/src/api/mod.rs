//! REST APIハンドラー
//!
//! UIが利用するステータス取得と生成プロキシ

pub mod error;
pub mod generate;
pub mod status;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status::get_status))
        .route("/api/generate", post(generate::proxy_generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
