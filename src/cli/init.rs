//! Init command implementation.
//!
//! Writes a `dice.yaml` holding the default settings, ready to edit.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME, CONFIG_TEMPLATE};
use crate::error::{DiceError, Result};
use crate::output::{display_path, Printer};

/// Write a default dice.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing dice.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(DiceError::Input {
            message: format!("{} already exists", display_path(&config_path)),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    if !args.path.exists() {
        fs::create_dir_all(&args.path).map_err(|e| DiceError::Io {
            path: args.path.clone(),
            message: format!("Failed to create directory: {}", e),
        })?;
    }

    fs::write(&config_path, CONFIG_TEMPLATE).map_err(|e| DiceError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    let defaults = Config::default();
    printer.status("Created", &display_path(&config_path));
    printer.info(
        "Defaults",
        &format!(
            "{}x{} tiles, {} theme, output {}",
            defaults.settings.grid_width,
            defaults.settings.grid_height,
            defaults.settings.theme,
            defaults.output.display()
        ),
    );

    Ok(())
}
