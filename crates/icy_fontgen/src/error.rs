//! Error types for icy_fontgen

use std::path::PathBuf;
use thiserror::Error;

use crate::GlyphId;

/// Main error type for font export operations
#[derive(Debug, Error)]
pub enum FontGenError {
    // === Font Errors ===
    #[error("Failed to load font '{path}': {message}")]
    FontLoad { path: PathBuf, message: String },

    #[error("Font '{name}' has no usable Unicode character map")]
    UnsupportedFont { name: String },

    #[error("No glyph for {identifier}")]
    GlyphMissing { identifier: GlyphId },

    // === Configuration Errors ===
    #[error("Invalid cell size {width}x{height} (width must be 1-8, height 1-64)")]
    InvalidCellSize { width: u32, height: u32 },

    #[error("Invalid preview scale {scale} (must be 1-16)")]
    InvalidScale { scale: u32 },

    #[error("Invalid preview column count {columns} (must be 1-256)")]
    InvalidColumns { columns: usize },

    #[error("Invalid remap entry for slot {slot}: {message}")]
    InvalidRemap { slot: usize, message: String },

    #[error("Invalid configuration '{path}': {message}")]
    InvalidConfig { path: PathBuf, message: String },

    // === Output Errors ===
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save image '{path}': {message}")]
    ImageSave { path: PathBuf, message: String },
}

/// Result type alias for icy_fontgen operations
pub type Result<T> = std::result::Result<T, FontGenError>;

impl FontGenError {
    /// Create a font load error
    pub fn font_load(path: impl Into<PathBuf>, msg: impl std::fmt::Display) -> Self {
        Self::FontLoad {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Create an I/O error carrying the target path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
