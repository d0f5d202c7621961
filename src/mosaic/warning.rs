//! Recoverable conditions reported alongside a generated mosaic.

use std::fmt;

/// A non-fatal condition recovered from during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Machine-readable code (e.g. "dice::sample::degenerate-region").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional hint for avoiding the condition.
    pub help: Option<String>,
}

impl Warning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to this warning.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)
    }
}

/// Collects warnings from the stages of one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        self.items.push(warning);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merge another collection into this one.
    pub fn merge(&mut self, other: Warnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.items.iter()
    }
}
