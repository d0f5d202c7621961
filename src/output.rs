//! Terminal output formatting for the dice CLI.
//!
//! Status lines go to stderr with a right-aligned coloured verb, in the
//! style of Cargo. stdout carries only machine-readable output.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::mosaic::{MosaicStats, Warnings};
use crate::types::FaceValue;

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Verb colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Green,
    Cyan,
    Yellow,
    Red,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Cyan => "\x1b[36m",
            Tone::Yellow => "\x1b[33m",
            Tone::Red => "\x1b[31m",
        }
    }
}

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "  Generating 40x40 mosaic from cat.jpg"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(Tone::Green, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(Tone::Cyan, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(Tone::Yellow, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(Tone::Red, verb, message);
    }

    /// Print each generation warning, with its help text dimmed.
    pub fn warnings(&self, warnings: &Warnings) {
        for warning in warnings.iter() {
            self.warning("Warning", &warning.to_string());
            if let Some(help) = &warning.help {
                self.print_line(Tone::Yellow, "", &self.dim(help));
            }
        }
    }

    /// Print the tile breakdown and cost.
    pub fn stats(&self, stats: &MosaicStats) {
        self.info(
            "Tiles",
            &format!("{} ({} x {})", stats.total, stats.cols, stats.rows),
        );
        let counts: Vec<String> = FaceValue::ALL
            .iter()
            .map(|&face| format!("{}:{}", face, stats.count(face)))
            .collect();
        self.info("Faces", &counts.join("  "));
        self.info(
            "Extremes",
            &format!("{} on face 1, {} on face 6", stats.white, stats.black),
        );
        self.info(
            "Cost",
            &format!("{:.2} ({} at {:.2})", stats.total_cost, plural(stats.total, "die", "dice"), stats.price_per_die),
        );
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, tone: Tone, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let color = tone.code();
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "die", "dice")` → "1 die".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            return if s.is_empty() { ".".to_string() } else { s };
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "die", "dice"), "1 die");
        assert_eq!(plural(0, "die", "dice"), "0 dice");
        assert_eq!(plural(1600, "die", "dice"), "1600 dice");
    }

    #[test]
    fn test_display_path_absolute() {
        let p = Path::new("/nonexistent/path/to/photo.png");
        assert_eq!(display_path(p), "/nonexistent/path/to/photo.png");
    }

    #[test]
    fn test_plain_printer_has_no_escapes() {
        let printer = Printer::plain();
        assert_eq!(printer.dim("hint"), "hint");
    }
}
