//! ロギング初期化
//!
//! 標準出力へ常に出力し、`UNAGI_LOG_DIR` が設定されていれば日次ローテーションのファイルにも書き出す。

use crate::config::get_env_with_fallback;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "unagi-gateway";

/// ファイル出力のバックグラウンドライターを保持するガード
///
/// ドロップするとバッファ済みのログがフラッシュされる。
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// ログレベルのフィルタ文字列
///
/// `UNAGI_LOG_LEVEL`（旧: `LOG_LEVEL`）→ `RUST_LOG` → `info` の順に参照する。
pub fn log_filter() -> String {
    get_env_with_fallback("UNAGI_LOG_LEVEL", "LOG_LEVEL")
        .or_else(|| std::env::var("RUST_LOG").ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// グローバルsubscriberを初期化する
pub fn init() -> anyhow::Result<LoggingGuard> {
    let log_dir = get_env_with_fallback("UNAGI_LOG_DIR", "LOG_DIR");
    init_with(&log_filter(), log_dir.as_deref().map(Path::new))
}

fn init_with(filter: &str, log_dir: Option<&Path>) -> anyhow::Result<LoggingGuard> {
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")));

    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(LoggingGuard { _file: file_guard })
}
