//! Watch command - regenerate when the image or config changes.
//!
//! `notify-debouncer-mini` collapses the burst of events from a single
//! save into one batch. Each batch reloads the settings into a
//! [`Debouncer`], and only the settings read after the quiet period are
//! generated. Every generation goes through the session's request/commit
//! ordering.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use clap::Args;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind};

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{DiceError, Result};
use crate::mosaic::MosaicStats;
use crate::output::{display_path, Printer};
use crate::session::{Commit, Debouncer, Session};

use super::generate::{report_outputs, write_outputs, ExportPlan};
use super::settings::SettingsArgs;

/// Regenerate whenever the image or config changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Image to convert
    #[arg(required = true)]
    pub image: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output directory (default from config, else "dist")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Quiet period before regenerating, in milliseconds
    #[arg(long, default_value = "300")]
    pub debounce_ms: u64,
}

/// Window for merging the raw events of one file write.
const FILE_EVENT_WINDOW: Duration = Duration::from_millis(50);

pub fn run(args: WatchArgs, printer: &Printer) -> Result<()> {
    let config_path = args
        .settings
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    let (tx, rx) = channel::<DebounceEventResult>();
    let mut watcher = new_debouncer(FILE_EVENT_WINDOW, tx).map_err(|e| watch_error(&args.image, e))?;
    for dir in watch_dirs(&args.image, &config_path) {
        watcher
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(&dir, e))?;
    }

    let mut session = Session::new();
    let mut pending: Debouncer<Config> = Debouncer::new(Duration::from_millis(args.debounce_ms));

    // Initial build runs straight away
    let config = args.settings.resolve(Path::new("."))?;
    rebuild(&mut session, &args, config, printer);
    printer.info("Watching", &format!("{} for changes", display_path(&args.image)));

    loop {
        let batch = match pending.deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match batch {
            Ok(Ok(events)) => {
                let changed = events.iter().any(|e| {
                    matches!(e.kind, DebouncedEventKind::Any) && is_watched(&e.path, &args.image, &config_path)
                });
                if changed {
                    match args.settings.resolve(Path::new(".")) {
                        Ok(config) => pending.push(config, Instant::now()),
                        Err(e) => printer.error("Config", &e.to_string()),
                    }
                }
            }
            Ok(Err(e)) => printer.warning("Watch", &format!("{}; continuing", e)),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                return Err(DiceError::Io {
                    path: args.image.clone(),
                    message: "File watcher stopped".to_string(),
                })
            }
        }

        if let Some(config) = pending.poll(Instant::now()) {
            rebuild(&mut session, &args, config, printer);
        }
    }
}

/// Reload the image and regenerate. Failures are reported, not returned,
/// so watching continues; the previous mosaic stays current.
fn rebuild(session: &mut Session, args: &WatchArgs, config: Config, printer: &Printer) -> Option<Commit> {
    match regenerate(session, args, config, printer) {
        Ok((commit, stats)) => {
            if let Some(stats) = stats {
                printer.stats(&stats);
            }
            Some(commit)
        }
        Err(e) => {
            printer.error("Failed", &e.to_string());
            None
        }
    }
}

fn regenerate(
    session: &mut Session,
    args: &WatchArgs,
    config: Config,
    printer: &Printer,
) -> Result<(Commit, Option<MosaicStats>)> {
    session.load_image(&args.image)?;

    let ticket = session.request(config.settings.clone());
    printer.status(
        "Generating",
        &format!("generation {} ({}x{})", ticket.generation(), config.settings.grid_width, config.settings.grid_height),
    );
    let mosaic = session.run(&ticket)?;
    printer.warnings(mosaic.warnings());

    let commit = session.commit(&ticket, mosaic);
    if commit == Commit::Stale {
        printer.warning("Skipped", "superseded by newer settings");
        return Ok((commit, None));
    }

    let mut plan = ExportPlan::new(&args.image, &config);
    if let Some(output) = &args.output {
        plan.output = output.clone();
    }

    let view = session
        .view()
        .ok_or_else(|| DiceError::input("No mosaic was generated"))?;
    let outputs = write_outputs(&view, &config, &plan)?;
    report_outputs(printer, &outputs);
    Ok((commit, Some(MosaicStats::from_view(&view))))
}

/// Directories to watch: the ones holding the image and the config file.
///
/// Parent directories are watched rather than the files so editors that
/// replace files on save are still seen.
fn watch_dirs(image: &Path, config: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for path in [image, config] {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Whether a changed path is the image or the config file.
fn is_watched(path: &Path, image: &Path, config: &Path) -> bool {
    same_file_name(path, image) || same_file_name(path, config)
}

fn same_file_name(a: &Path, b: &Path) -> bool {
    match (a.file_name(), b.file_name()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn watch_error(path: &Path, e: notify::Error) -> DiceError {
    DiceError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to watch: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_watched_paths() {
        let image = Path::new("photos/cat.png");
        let config = Path::new("dice.yaml");

        assert!(is_watched(Path::new("/abs/photos/cat.png"), image, config));
        assert!(is_watched(Path::new("./dice.yaml"), image, config));
        assert!(!is_watched(Path::new("photos/dog.png"), image, config));
        assert!(!is_watched(Path::new("photos"), image, config));
    }


    #[test]
    fn test_watch_dirs_deduplicates() {
        let dirs = watch_dirs(Path::new("cat.png"), Path::new("dice.yaml"));
        assert_eq!(dirs, vec![PathBuf::from(".")]);

        let dirs = watch_dirs(Path::new("img/cat.png"), Path::new("dice.yaml"));
        assert_eq!(dirs, vec![PathBuf::from("img"), PathBuf::from(".")]);
    }

    #[test]
    fn test_rebuild_writes_outputs_and_survives_errors() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("cat.png");
        RgbaImage::from_pixel(30, 30, Rgba([90, 90, 90, 255]))
            .save(&image)
            .unwrap();
        let out = dir.path().join("out");

        let args = WatchArgs {
            image: image.clone(),
            settings: SettingsArgs::default(),
            output: Some(out.clone()),
            debounce_ms: 300,
        };
        let printer = Printer::plain();
        let mut session = Session::new();

        let config = Config {
            cell_size: 4,
            ..Default::default()
        };
        assert_eq!(rebuild(&mut session, &args, config.clone(), &printer), Some(Commit::Applied));
        assert!(out.join("cat.csv").exists());
        assert_eq!(session.generation(), 1);

        // A broken config value is reported and the old mosaic kept
        let mut bad = config;
        bad.settings.grid_width = 5;
        assert_eq!(rebuild(&mut session, &args, bad, &printer), None);
        assert_eq!(session.mosaic().unwrap().dimensions(), (40, 40));
    }
}
