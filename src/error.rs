use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Errors raised while loading a glyph sheet
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to load font sheet {path}: {source}")]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Glyph cell size must be non-zero, got {width}x{height}")]
    ZeroCell { width: u32, height: u32 },

    #[error(
        "Font sheet {sheet_width}x{sheet_height} is not a whole number of {cell_width}x{cell_height} cells"
    )]
    Misaligned {
        sheet_width: u32,
        sheet_height: u32,
        cell_width: u32,
        cell_height: u32,
    },

    #[error("Font sheet contains no glyph cells")]
    Empty,
}

/// Top-level startup error for the application binary
#[derive(Debug, Error)]
pub enum PaintError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Window error: {0}")]
    Window(String),
}

/// Result type for startup operations
pub type PaintResult<T> = Result<T, PaintError>;
