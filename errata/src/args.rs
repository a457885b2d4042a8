use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// errata status server
#[derive(Debug, Parser)]
#[command(name = "errata", about = "HTTP server answering with catalog error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "errata.toml", env = "ERRATA_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ERRATA_LISTEN")]
    pub listen: Option<SocketAddr>,
}
