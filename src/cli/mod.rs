pub mod completions;
pub mod generate;
pub mod init;
pub mod settings;
pub mod stats;
pub mod watch;

use clap::{Parser, Subcommand};

/// dice - Turn images into dice mosaics
#[derive(Parser, Debug)]
#[command(name = "dice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a mosaic and write CSV and PNG exports
    Generate(generate::GenerateArgs),

    /// Print tile counts and cost for an image
    Stats(stats::StatsArgs),

    /// Regenerate whenever the image or config changes
    Watch(watch::WatchArgs),

    /// Write a default dice.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
