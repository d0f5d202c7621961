use clap::Parser;
use dice_mosaic::cli::{Cli, Commands};
use dice_mosaic::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => dice_mosaic::cli::generate::run(args, &printer)?,
        Commands::Stats(args) => dice_mosaic::cli::stats::run(args, &printer)?,
        Commands::Watch(args) => dice_mosaic::cli::watch::run(args, &printer)?,
        Commands::Init(args) => dice_mosaic::cli::init::run(args, &printer)?,
        Commands::Completions(args) => dice_mosaic::cli::completions::run(args)?,
    }

    Ok(())
}
