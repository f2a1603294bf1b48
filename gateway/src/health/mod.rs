//! 稼働状況推定
//!
//! 解決済みバックエンドの `/status` をプローブし、到達できない場合は
//! 週次スケジュール窓から「起動中」か「予定時間外」かを推定する。

pub mod availability;
pub mod schedule;

pub use availability::AvailabilityEstimator;
pub use schedule::{Clock, FixedClock, ScheduleWindow, SystemClock, SCHEDULE_WINDOW};
