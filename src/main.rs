//! olsserve - Main Entry Point

use clap::Parser;
use olsserve::cli::Cli;
use olsserve::server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "olsserve=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    run_server(cli.into_config()).await
}
