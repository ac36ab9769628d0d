//! Errors raised while learning a model, validating a run or touching files
//!
//! A contradiction reached while solving is not an error: it is reported
//! through [`crate::algorithm::executor::SolveStatus`] so callers can retry
//! with another seed.

use std::fmt;
use std::path::{Path, PathBuf};

/// Everything that can stop a generation before or around the solve
#[derive(Debug)]
pub enum AlgorithmError {
    /// A sample PNG could not be opened or decoded
    ImageLoad {
        /// Sample path
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// The sample or derived symbol set cannot drive a solve
    InvalidSample {
        /// What the sample lacks
        reason: String,
    },

    /// A configuration value is out of range
    InvalidParameter {
        /// Name of the parameter
        parameter: &'static str,
        /// Rejected value as given
        value: String,
        /// Accepted range or rule
        reason: String,
    },

    /// A handcrafted rule names a symbol outside the palette
    InvalidSymbolIndex {
        /// Offending symbol
        index: usize,
        /// Palette size
        symbol_count: usize,
    },

    /// The command-line target is neither a PNG nor a directory
    InvalidTarget {
        /// Target as given
        path: PathBuf,
        /// Why it was refused
        reason: &'static str,
    },

    /// An output grid without cells was handed to the exporter
    EmptyGrid {
        /// Grid rows
        rows: usize,
        /// Grid columns
        cols: usize,
    },

    /// A result PNG could not be written
    ImageExport {
        /// Destination path
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Reading a directory or creating one failed
    FileSystem {
        /// Path involved
        path: PathBuf,
        /// Operation attempted
        operation: &'static str,
        /// I/O error
        source: std::io::Error,
    },

    /// Symbol weights produced a non-finite aggregate
    Numerical {
        /// Quantity being computed
        quantity: &'static str,
        /// Values that broke it
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot read sample '{}': {source}", path.display())
            }
            Self::InvalidSample { reason } => write!(f, "Unusable sample: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid {parameter} '{value}': {reason}"),
            Self::InvalidSymbolIndex {
                index,
                symbol_count,
            } => write!(
                f,
                "Symbol index {index} is out of bounds ({symbol_count} symbols)"
            ),
            Self::InvalidTarget { path, reason } => {
                write!(f, "Cannot process '{}': {reason}", path.display())
            }
            Self::EmptyGrid { rows, cols } => {
                write!(f, "Cannot export an empty {cols}x{rows} grid")
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write result '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(f, "Failed to {operation} '{}': {source}", path.display()),
            Self::Numerical { quantity, reason } => {
                write!(f, "Non-finite {quantity}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "access",
            source: err,
        }
    }
}

/// Reject a configuration value
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Reject a sample or the symbols learned from it
pub fn invalid_sample(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidSample {
        reason: reason.to_string(),
    }
}

/// Report a non-finite weight aggregate
pub fn numerical_error(quantity: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Numerical {
        quantity,
        reason: reason.to_string(),
    }
}

/// Refuse a command-line target
pub fn invalid_target(path: &Path, reason: &'static str) -> AlgorithmError {
    AlgorithmError::InvalidTarget {
        path: path.to_path_buf(),
        reason,
    }
}
