use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Lumen image generation front end
#[derive(Debug, Parser)]
#[command(name = "lumen", about = "Browser front end for hosted text-to-image generation")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lumen.toml", env = "LUMEN_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LUMEN_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Default log filter when `RUST_LOG` is unset
    #[arg(long, default_value = "info", env = "LUMEN_LOG")]
    pub log: String,
}
