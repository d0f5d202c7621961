use miette::Diagnostic;
use thiserror::Error;

/// Main error type for dice-mosaic operations
#[derive(Error, Diagnostic, Debug)]
pub enum DiceError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(dice::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(dice::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not decode image: {message}")]
    #[diagnostic(code(dice::decode))]
    Decode {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(dice::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(dice::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl DiceError {
    /// Shorthand for an input-contract violation without help text.
    pub fn input(message: impl Into<String>) -> Self {
        DiceError::Input {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiceError>;
