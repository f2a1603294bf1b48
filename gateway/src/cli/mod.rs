//! CLI module for unagi-gateway
//!
//! Provides the command-line interface for running and querying the gateway.

pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

/// Unagi gateway - availability and generation proxy for the Unagi inference backend
#[derive(Parser, Debug)]
#[command(name = "unagi-gateway")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    UNAGI_HOST                    Bind address (default: 0.0.0.0)
    UNAGI_PORT                    Listen port (default: 3000)
    UNAGI_LOG_LEVEL               Log level (default: info)
    UNAGI_LOG_DIR                 Also write daily-rotated log files here
    UNAGI_API_URL                 Fallback backend URL
    UNAGI_LOOKUP_URL              Backend URL lookup service
    UNAGI_PROBE_TIMEOUT_SECS      Lookup / health probe timeout (default: 5)
    UNAGI_GENERATE_TIMEOUT_SECS   Generate request timeout (default: 120)
    UNAGI_POLL_INTERVAL_SECS      `status --watch` interval (default: 30)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gateway server
    Serve(serve::ServeArgs),
    /// Show the backend status reported by a running gateway
    Status(status::StatusArgs),
}
