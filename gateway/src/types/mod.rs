//! 型定義モジュール

/// 稼働状況の型定義
pub mod status;

pub use status::{QueueStatus, ServiceState};
