// CLI modules
mod args;
mod op;
mod ops;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Get, Health, Recover, Shard, Size};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Get, Get),
    (Health, Health),
    (Recover, Recover),
    (Shard, Shard),
    (Size, Size),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(&args.log_level);

    // Build context - loads the configuration exactly once, before any
    // operation runs; a broken config is fatal.
    let ctx = match op::OpContext::new(&args.config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: failed to load gateway configuration: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing on stderr so streamed object bytes on stdout stay
/// clean.
fn init_tracing(log_level: &str) {
    let level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
