//! Anillo CLI - stream a synthesized tone through a ring-buffered audio device.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "anillo")]
#[command(author, version, about = "Ring-buffered tone streamer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a synthesized tone through the default output device
    Play(commands::play::PlayArgs),

    /// List available audio output devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
