mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::generate::GenerateArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemaforge", about = "Generate source code from schema definitions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate target-language code from a directory of schema files
    Generate(GenerateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => args.run(),
    }
}
