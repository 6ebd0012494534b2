use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a typer configuration or loading a keyboard.
///
/// Navigation and text editing never fail; only the configuration boundary does.
#[derive(Debug, Error)]
pub enum TyperError {
    #[error("secondary character delay must be a positive number of seconds, got {0}")]
    InvalidSecondaryDelay(f64),

    #[error("glyph entry `{entry}` has no characters")]
    EmptyGlyph { entry: String },

    #[error("numeric glyph {0} is not a single digit")]
    NotADigit(u32),

    #[error("failed to read keyboard file {path}")]
    ReadKeyboard {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML keyboard definition")]
    KeyboardToml(#[from] toml::de::Error),

    #[error("invalid JSON keyboard definition")]
    KeyboardJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TyperError>;
