//! Error types for figure export, animation, tables and CSV input

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::figure::AxesId;
use crate::stylesheet::StylesheetError;

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while producing article artifacts
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem access failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generated SVG could not be parsed for rasterization
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// The plotting backend failed while drawing a figure
    #[error("drawing failed: {0}")]
    Draw(String),

    /// PNG encoding or decoding failed
    #[error("PNG error on '{}': {message}", path.display())]
    Png { path: PathBuf, message: String },

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV cell that is not a floating-point number
    #[error("non-numeric value '{value}' at row {row}, column {column}")]
    CsvValue {
        row: usize,
        column: usize,
        value: String,
    },

    /// A CSV file with no data columns
    #[error("CSV file '{}' has no columns", .0.display())]
    EmptyCsv(PathBuf),

    /// House style could not be loaded
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    /// The external video encoder failed
    #[error("encoder '{program}' failed: {reason}")]
    Encoder { program: String, reason: String },

    /// A sub-plot span does not fit the figure grid
    #[error("grid span {span:?} at {position:?} does not fit a {rows}x{cols} grid")]
    InvalidGridSpan {
        position: (usize, usize),
        span: (usize, usize),
        rows: usize,
        cols: usize,
    },

    /// An axes handle from another figure
    #[error("figure has no axes {0:?}")]
    UnknownAxes(AxesId),

    /// An animation with zero frames
    #[error("animation has no frames")]
    EmptyAnimation,
}

impl Error {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a PNG error for a path
    pub fn png(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Png {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create an encoder failure
    pub fn encoder(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encoder {
            program: program.into(),
            reason: reason.into(),
        }
    }
}
