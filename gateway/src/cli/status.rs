//! status subcommand
//!
//! Displays the backend status reported by a running gateway.

use crate::config::get_poll_interval;
use crate::logging;
use crate::poller::{RemoteStatusSource, StatusPoller, StatusSource};
use crate::types::QueueStatus;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Arguments for the status subcommand
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Gateway base URL
    #[arg(short, long, default_value = "http://127.0.0.1:3000", env = "UNAGI_GATEWAY_URL")]
    pub url: String,

    /// Keep polling until interrupted
    #[arg(short, long, default_value_t = false)]
    pub watch: bool,

    /// Polling interval in seconds (with --watch)
    #[arg(short, long)]
    pub interval: Option<u64>,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs) -> Result<(), anyhow::Error> {
    // 設定済みのsubscriberがあればそれを使う
    let _logging = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            debug!(error = %e, "Using existing tracing subscriber");
            None
        }
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let source = RemoteStatusSource::new(client, &args.url);

    if !args.watch {
        println!("{}", format_status(&source.fetch_status().await));
        return Ok(());
    }

    let period = args
        .interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(get_poll_interval);
    let poller = StatusPoller::spawn(Arc::new(source), period);
    let mut updates = poller.subscribe();

    println!("{}", format_status(&updates.borrow_and_update()));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", format_status(&updates.borrow_and_update()));
            }
        }
    }

    poller.stop().await;
    Ok(())
}

fn format_status(status: &QueueStatus) -> String {
    let mut line = format!("{}\t{}", status.status, status.message());
    if let Some(position) = status.queue_position {
        line.push_str(&format!("\tqueue position: {}", position));
    }
    line
}
