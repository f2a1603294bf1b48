//! serve サブコマンド
//!
//! ゲートウェイサーバーを起動します。

use crate::config::GatewayConfig;
use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port (overrides UNAGI_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address (overrides UNAGI_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

impl ServeArgs {
    /// 環境変数の設定に引数を上書きする
    pub fn into_config(self) -> GatewayConfig {
        let config = GatewayConfig::from_env();
        let host = self.host.unwrap_or_else(|| config.host.clone());
        let port = self.port.unwrap_or(config.port);
        config.with_bind(host, port)
    }
}
