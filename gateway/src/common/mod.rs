//! 共通型定義
//!
//! エラー型と上流バックエンドとのワイヤープロトコル

pub mod error;
pub mod protocol;
