//! Stats command - tile counts and cost without writing any files.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{DiceError, Result};
use crate::mosaic::MosaicStats;
use crate::output::{display_path, Printer};
use crate::session::Session;

use super::generate::apply_edits;
use super::settings::SettingsArgs;

/// Print tile counts and cost for an image
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Image to analyse
    #[arg(required = true)]
    pub image: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// CSV of manual tile edits to count in
    #[arg(long)]
    pub edits: Option<PathBuf>,

    /// Print JSON to stdout instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs, printer: &Printer) -> Result<()> {
    let stats = compute(&args)?;

    if args.json {
        let json = serde_json::to_string_pretty(&stats).map_err(|e| DiceError::Render {
            message: format!("Failed to serialize stats: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        printer.status("Analysed", &display_path(&args.image));
        printer.stats(&stats);
    }

    Ok(())
}

/// Generate the mosaic for `args` and count it.
pub fn compute(args: &StatsArgs) -> Result<MosaicStats> {
    let config = args.settings.resolve(Path::new("."))?;

    let mut session = Session::new();
    session.load_image(&args.image)?;
    session.regenerate(config.settings)?;

    if let Some(edits) = &args.edits {
        apply_edits(&mut session, edits)?;
    }

    let view = session
        .view()
        .ok_or_else(|| DiceError::input("No mosaic was generated"))?;
    Ok(MosaicStats::from_view(&view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_compute_stats() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("white.png");
        RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();

        let args = StatsArgs {
            image: path,
            settings: SettingsArgs {
                width: Some(10),
                height: Some(20),
                price: Some(0.5),
                invert: Some(false),
                ..Default::default()
            },
            edits: None,
            json: true,
        };
        let stats = compute(&args).unwrap();

        assert_eq!(stats.total, 200);
        assert_eq!(stats.black, 200);
        assert_eq!(stats.white, 0);
        assert!((stats.total_cost - 100.0).abs() < 1e-9);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["face_counts"][5], 200);
    }
}
