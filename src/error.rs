//! Error types for keyremap operations.

use std::path::Path;

use thiserror::Error;

/// Primary error type for keyremap operations.
#[derive(Error, Debug)]
pub enum KrError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // Preset errors
    #[error("Failed to parse preset '{path}': {reason}")]
    PresetParse { path: String, reason: String },

    // Symbol resolution errors
    #[error("Unknown symbol: '{name}'")]
    UnknownSymbol { name: String },

    #[error("Macro parse error in '{symbol}': {reason}")]
    MacroParse { symbol: String, reason: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl KrError {
    /// Build a [`KrError::PresetParse`] for a preset file path.
    pub fn preset_parse(path: &Path, reason: impl Into<String>) -> Self {
        Self::PresetParse {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::UnknownSymbol { .. }
                | Self::MacroParse { .. }
                | Self::PresetParse { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => Some("Start keyremap once to create a configuration"),
            Self::UnknownSymbol { .. } => {
                Some("Check the symbol against known key names (e.g. 'a', 'shift_l', 'btn_left')")
            }
            Self::PresetParse { .. } => Some("Fix or remove the malformed preset file"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using KrError.
pub type Result<T> = std::result::Result<T, KrError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| KrError::Other(format!("{}: {e}", f().into())))
    }
}
