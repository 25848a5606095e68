//! Command line interface of the `olsserve` binary.

use clap::Parser;

use crate::server::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "olsserve")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve a single ordinary least squares model over HTTP")]
#[command(long_about = None)]
pub struct Cli {
    /// Server host [env: API_HOST, default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Server port [env: API_PORT, default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Maximum request body size in bytes [env: MAX_BODY_SIZE]
    #[arg(long)]
    pub max_body_size: Option<usize>,

    /// Relative tolerance used to detect collinear features [env: RANK_TOLERANCE]
    #[arg(long)]
    pub rank_tolerance: Option<f64>,
}

impl Cli {
    /// Overrides the environment-derived defaults with the flags that were set.
    pub fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::default();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(max_body_size) = self.max_body_size {
            config.max_body_size = max_body_size;
        }
        if let Some(rank_tolerance) = self.rank_tolerance {
            config.rank_tolerance = rank_tolerance;
        }
        config
    }
}
