//! Project configuration (dice.yaml).
//!
//! The config file holds default settings for a project so they need not
//! be repeated on the command line. Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};
use crate::export::DEFAULT_EXPORT_FACTOR;
use crate::types::Settings;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "dice.yaml";

/// Template written by `dice init`.
pub const CONFIG_TEMPLATE: &str = r##"# dice-mosaic project settings
grid_width: 40
grid_height: 40
contrast: 50
brightness: 50
# black | white | mixed
theme: white
# ramp | alternating (mixed theme only)
mixed_style: alternating
# mixed_colour_a: "#E07A3F"
# mixed_colour_b: "#3F7CAC"
use_shading: true
price_per_die: 0.10
# Tile size in preview pixels, and export supersampling
cell_size: 20
export_factor: 2
output: dist
"##;

/// Project configuration loaded from dice.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub settings: Settings,

    /// Preview pixels per tile.
    pub cell_size: u32,

    /// Supersampling factor for PNG export.
    pub export_factor: u32,

    /// Output directory for exports.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            cell_size: 20,
            export_factor: DEFAULT_EXPORT_FACTOR,
            output: PathBuf::from("dist"),
        }
    }
}

impl Config {
    /// Load config from a dice.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DiceError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| DiceError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `path` if given, else `dice.yaml` in `dir` if present, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Theme};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal() {
        let config = Config::parse("grid_width: 64").unwrap();
        assert_eq!(config.settings.grid_width, 64);
        assert_eq!(config.settings.grid_height, 40);
        assert_eq!(config.output, PathBuf::from("dist"));
    }

    #[test]
    fn test_parse_full() {
        let yaml = r##"
grid_width: 80
grid_height: 60
contrast: 70
brightness: 45
theme: mixed
mixed_style: ramp
mixed_colour_a: "#102030"
mixed_colour_b: navy
use_shading: false
price_per_die: 0.05
invert: true
cell_size: 12
export_factor: 4
output: build/mosaics
"##;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.settings.grid_width, 80);
        assert_eq!(config.settings.contrast, 70);
        assert_eq!(config.settings.theme, Theme::Mixed);
        assert_eq!(config.settings.mixed_colour_a, Some(Colour::rgb(0x10, 0x20, 0x30)));
        assert_eq!(config.settings.mixed_colour_b, Some(Colour::rgb(0, 0, 128)));
        assert!(!config.settings.use_shading);
        assert_eq!(config.settings.invert, Some(true));
        assert_eq!(config.cell_size, 12);
        assert_eq!(config.export_factor, 4);
        assert_eq!(config.output, PathBuf::from("build/mosaics"));
    }

    #[test]
    fn test_template_matches_defaults() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Config::parse("theme: purple").is_err());
        assert!(Config::parse("mixed_colour_a: notacolour").is_err());
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(CONFIG_FILENAME), "cell_size: 8\n").unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap().cell_size, 8);

        let missing = dir.path().join("other.yaml");
        assert!(Config::discover(Some(&missing), dir.path()).is_err());
    }
}
