//! Unagi Gateway Server Entry Point

use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn};
use unagi_gateway::cli::{serve::ServeArgs, Cli, Commands};
use unagi_gateway::config::GatewayConfig;
use unagi_gateway::shutdown::ShutdownController;
use unagi_gateway::{api, logging, AppState};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Status(args)) => unagi_gateway::cli::status::execute(&args).await,
        Some(Commands::Serve(args)) => serve(args).await,
        None => serve(ServeArgs::default()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let _logging = logging::init()?;
    let config = args.into_config();
    run_server(config).await
}

async fn run_server(config: GatewayConfig) -> anyhow::Result<()> {
    info!("Unagi Gateway v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(&config)?;
    info!(
        fallback_api_url = %config.fallback_api_url,
        lookup_url = %config.lookup_url,
        probe_timeout_secs = config.probe_timeout.as_secs(),
        "Endpoint resolver initialized"
    );

    let app = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr: SocketAddr = listener.local_addr()?;
    info!("Gateway server listening on {}", local_addr);

    let shutdown = ShutdownController::default();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal.request_shutdown();
            }
            Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    info!("Gateway server stopped");
    Ok(())
}
