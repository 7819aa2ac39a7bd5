pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sds")]
#[command(about = "Gateway CLI for the SDS blob-storage service")]
pub struct Args {
    /// Path to the gateway config file
    #[arg(long, global = true, default_value = "./config-sds.json")]
    pub config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
