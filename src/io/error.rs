//! Error types for palette loading, matching and puzzle compositing

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all puzzle operations
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// Failed to decode an image from the filesystem
    #[error("Failed to load image '{}': {source}", .path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or save a finished canvas
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration value failed validation
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Match mode string is not one of the recognized modes
    #[error("Unknown match mode '{0}' (expected one of: rgb, gray, hash)")]
    UnknownMode(String),

    /// A palette file line or name could not be interpreted
    #[error("Malformed palette '{}' at line {line}: {reason}", .path.display())]
    PaletteParse {
        /// Palette file being parsed
        path: PathBuf,
        /// 1-based line number, 0 when the file name itself is at fault
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// No palette was loaded for the requested category
    #[error("No palette loaded for category '{category}'")]
    MissingCategory {
        /// Category id derived from the target's folder
        category: String,
    },

    /// Nearest-match search ran against a pool with no candidates
    #[error("Candidate pool is empty")]
    EmptyPool,

    /// Two signatures of different modes were compared
    #[error("Cannot compare a {found} signature against a {expected} signature")]
    ModeMismatch {
        /// Mode of the query signature
        expected: crate::signature::MatchMode,
        /// Mode of the candidate signature
        found: crate::signature::MatchMode,
    },

    /// Some jobs in a batch failed after the whole batch ran
    #[error("{failed} of {total} jobs failed")]
    BatchFailed {
        /// Number of failed jobs
        failed: usize,
        /// Number of jobs attempted
        total: usize,
    },

    /// Two images that must share a size do not
    #[error("Image dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Dimensions of the first image (width, height)
        left: (u32, u32),
        /// Dimensions of the second image (width, height)
        right: (u32, u32),
    },
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation it came from
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> PuzzleError {
    PuzzleError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

/// Require a strictly positive configuration value
///
/// # Errors
///
/// Returns `InvalidParameter` when `value` is zero
pub fn require_positive<T>(parameter: &'static str, value: T) -> Result<T>
where
    T: PartialOrd + Default + ToString,
{
    if value > T::default() {
        Ok(value)
    } else {
        Err(invalid_parameter(parameter, &value, &"must be at least 1"))
    }
}
