//! # Error Types
//!
//! Errors raised at the fallible edges: attribute files and colour strings.
//! Widget operations themselves never fail; they normalise their input.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading view attributes.
#[derive(Error, Debug)]
pub enum WaveError {
    /// A colour string was not `#RRGGBB` or `#AARRGGBB`.
    #[error("invalid colour: {0:?} (expected #RRGGBB or #AARRGGBB)")]
    InvalidColor(String),

    /// The attribute file could not be read.
    #[error("cannot read attribute file {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The attribute file is not valid TOML, or does not match the expected
    /// tables (including malformed colour strings).
    #[error("invalid attribute file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for attribute loading.
pub type WaveResult<T> = Result<T, WaveError>;
