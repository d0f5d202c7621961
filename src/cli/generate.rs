//! Generate command implementation.
//!
//! Turns one image into a mosaic and writes the CSV table, the
//! supersampled PNG and optionally a preview PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::{DiceError, Result};
use crate::export::{
    check_factor, export_png, parse_csv, records_to_overrides, to_csv, write_csv, CsvLayout,
};
use crate::mosaic::{MosaicStats, TileView};
use crate::output::{display_path, Printer};
use crate::render::{write_png, MosaicRenderer};
use crate::session::Session;

use super::settings::SettingsArgs;

/// Generate a mosaic and write CSV and PNG exports
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Image to convert
    #[arg(required = true)]
    pub image: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output directory (default from config, else "dist")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// CSV of manual tile edits, in the exported table format
    #[arg(long)]
    pub edits: Option<PathBuf>,

    /// CSV table layout
    #[arg(long, value_enum, default_value_t = CsvLayout::Full)]
    pub csv_layout: CsvLayout,

    /// Supersampling factor for the PNG export (2-8)
    #[arg(long)]
    pub factor: Option<u32>,

    /// Also write a preview PNG at 1x
    #[arg(long)]
    pub preview: bool,

    /// Print the CSV table to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

/// Where one generation's files went.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    /// `None` when the table went to stdout.
    pub csv: Option<PathBuf>,
    pub png: PathBuf,
    pub png_size: (u32, u32),
    pub preview: Option<PathBuf>,
}

/// Per-run export choices, separate from the mosaic settings.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub output: PathBuf,
    pub stem: String,
    pub layout: CsvLayout,
    pub factor: u32,
    pub preview: bool,
    pub csv_to_stdout: bool,
}

impl ExportPlan {
    pub fn new(image: &Path, config: &Config) -> Self {
        let stem = image
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mosaic")
            .to_string();
        Self {
            output: config.output.clone(),
            stem,
            layout: CsvLayout::Full,
            factor: config.export_factor,
            preview: false,
            csv_to_stdout: false,
        }
    }
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let config = args.settings.resolve(Path::new("."))?;

    let mut plan = ExportPlan::new(&args.image, &config);
    if let Some(output) = &args.output {
        plan.output = output.clone();
    }
    if let Some(factor) = args.factor {
        plan.factor = factor;
    }
    plan.layout = args.csv_layout;
    plan.preview = args.preview;
    plan.csv_to_stdout = args.stdout;
    check_factor(plan.factor)?;

    let mut session = Session::new();
    printer.status("Loading", &display_path(&args.image));
    session.load_image(&args.image)?;

    let settings = &config.settings;
    printer.status(
        "Generating",
        &format!("{}x{} mosaic ({} theme)", settings.grid_width, settings.grid_height, settings.theme),
    );
    let warnings = session.regenerate(config.settings.clone())?.warnings().clone();
    printer.warnings(&warnings);

    if let Some(edits) = &args.edits {
        apply_edits(&mut session, edits)?;
        printer.info("Applied", &format!("edits from {}", display_path(edits)));
    }

    let view = session
        .view()
        .ok_or_else(|| DiceError::input("No mosaic was generated"))?;
    let outputs = write_outputs(&view, &config, &plan)?;

    report_outputs(printer, &outputs);
    printer.stats(&MosaicStats::from_view(&view));
    Ok(())
}

/// Load a CSV of edits into the session's edit layer.
pub fn apply_edits(session: &mut Session, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|e| DiceError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read edits: {}", e),
    })?;
    let records = parse_csv(&text)?;

    let (rows, cols) = session
        .mosaic()
        .map(|m| m.dimensions())
        .ok_or_else(|| DiceError::input("There is no mosaic to edit"))?;

    // Start from the current edits so unlisted tiles keep their values
    let mut edits = session
        .edits()
        .cloned()
        .ok_or_else(|| DiceError::input("There is no mosaic to edit"))?;
    for (row, col, cell) in records_to_overrides(&records, rows, cols)?.iter() {
        edits = edits.apply(row, col, *cell)?;
    }

    session.set_edits(edits)
}

/// Write CSV, PNG export and optional preview for `view`.
pub fn write_outputs(view: &TileView<'_>, config: &Config, plan: &ExportPlan) -> Result<Outputs> {
    if !plan.output.exists() {
        fs::create_dir_all(&plan.output).map_err(|e| DiceError::Io {
            path: plan.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let renderer = MosaicRenderer::new(config.cell_size).with_shading(view.mosaic().settings().use_shading);

    let csv = if plan.csv_to_stdout {
        print!("{}", to_csv(view, plan.layout));
        None
    } else {
        let path = plan.output.join(format!("{}.csv", plan.stem));
        write_csv(view, plan.layout, &path)?;
        Some(path)
    };

    let png = plan.output.join(format!("{}.png", plan.stem));
    let png_size = export_png(view, &renderer, plan.factor, &png)?;

    let preview = if plan.preview {
        let path = plan.output.join(format!("{}-preview.png", plan.stem));
        write_png(&renderer.render_image(view, 1)?, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(Outputs {
        csv,
        png,
        png_size,
        preview,
    })
}

/// Report the files written by one generation.
pub fn report_outputs(printer: &Printer, outputs: &Outputs) {
    if let Some(csv) = &outputs.csv {
        printer.status("Wrote", &display_path(csv));
    }
    let (w, h) = outputs.png_size;
    printer.status("Wrote", &format!("{} ({}x{})", display_path(&outputs.png), w, h));
    if let Some(preview) = &outputs.preview {
        printer.status("Wrote", &display_path(preview));
    }
}
