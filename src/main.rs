use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use graphqa::cli::{Cli, Commands};
use graphqa::commands;

/// We need an async main function for the async code
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with stderr output so stdout stays clean for results
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            question,
            no_repair,
            allow_writes,
        } => commands::ask::run(&question, !no_repair, allow_writes).await?,
        Commands::Batch {
            file,
            no_repair,
            allow_writes,
        } => commands::batch::run(file.as_deref(), !no_repair, allow_writes).await?,
        Commands::Schema => commands::schema::run().await?,
        Commands::Seed => commands::seed::run().await?,
    }

    Ok(())
}
