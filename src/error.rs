//! Unified error types for shellac
//!
//! Error strategy:
//! - Pipeline-internal failures (detection, extraction) are caught at the
//!   pipeline boundary and degrade to the generated placeholder label.
//! - Color extraction errors are recoverable: the caller keeps its prior
//!   or default colors.
//! - Fetch, decode and output errors abort the current record load; the
//!   process stays alive and a new identifier can always be attempted.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for shellac operations
#[derive(Debug, Error)]
pub enum ShellacError {
    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("Invalid identifier '{0}'\n  Tip: pass an archive identifier or an archive.org/details/<id> URL")]
    InvalidIdentifier(String),

    #[error("Failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    #[error("Could not resolve record metadata: {reason}")]
    MetadataParse { reason: String },

    // Recoverable: the display keeps its previous colors
    #[error("Color extraction failed: {reason}")]
    ColorExtraction { reason: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: check write permissions for the output directory")]
    Output { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellacError {
    /// Whether the failure degrades gracefully instead of aborting the
    /// current record load.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShellacError::ColorExtraction { .. })
    }
}

/// Result type alias for shellac operations
pub type Result<T> = std::result::Result<T, ShellacError>;
