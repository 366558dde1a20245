//! Error types for level generation, serialization and output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all level generation operations
#[derive(Debug)]
pub enum LevelError {
    /// Cell access outside the grid
    ///
    /// Generation loops never produce this with correct bounds; it surfaces
    /// caller mistakes when addressing cells directly.
    OutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Maze carving was asked to start on or outside the border
    InvalidStart {
        /// Requested start column
        x: i32,
        /// Requested start row
        y: i32,
    },

    /// Marker placement could not meet its constraints within the sweep budget
    PlacementUnsatisfiable {
        /// Markers that satisfied the constraints before giving up
        placed: usize,
        /// Markers requested
        requested: usize,
        /// Full-grid sweeps performed
        sweeps: u32,
    },

    /// Request or configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Serialized level text could not be read back
    Parse {
        /// One-based line number in the input text
        line: usize,
        /// Description of what is malformed
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is outside the {width}x{height} grid"
                )
            }
            Self::InvalidStart { x, y } => {
                write!(
                    f,
                    "Carving start ({x}, {y}) must lie strictly inside the border"
                )
            }
            Self::PlacementUnsatisfiable {
                placed,
                requested,
                sweeps,
            } => {
                write!(
                    f,
                    "Placed only {placed} of {requested} markers after {sweeps} sweeps"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Parse { line, reason } => {
                write!(f, "Malformed level text at line {line}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for level generation results
pub type Result<T> = std::result::Result<T, LevelError>;

impl From<std::io::Error> for LevelError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LevelError {
    LevelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a parse error for a one-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> LevelError {
    LevelError::Parse {
        line,
        reason: reason.to_string(),
    }
}
