pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "driftwood")]
#[command(version)]
#[command(about = "A server-rendered blog front-end over a remote content API", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "driftwood.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the front-end server.
    Serve {
        /// Bind host; defaults to the configured server.host.
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Bind port; defaults to the configured server.port.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check configuration and upstream reachability.
    Check,
}
