//! Error types for sprite preparation operations
//!
//! All fallible library operations return [`SpritePrepError`] through the
//! crate-wide [`Result`] alias. Helper constructors keep error creation
//! consistent across modules.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SpritePrepError>;

/// Errors that can occur during sprite preparation
#[derive(Debug, Error)]
pub enum SpritePrepError {
    /// Invalid configuration parameters
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem
        message: String,
    },

    /// Image processing failure
    #[error("Processing error: {message}")]
    Processing {
        /// Description of the processing failure
        message: String,
    },

    /// File I/O failure with operation context
    #[error("Failed to {operation} '{path}': {source}")]
    FileIo {
        /// The operation that was attempted (e.g. "read image file")
        operation: String,
        /// The path involved in the operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error from the image codec
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

impl SpritePrepError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a configuration error for a value outside its valid range
    pub fn config_value_error<V: std::fmt::Display>(
        parameter: &str,
        value: V,
        valid_range: &str,
    ) -> Self {
        Self::InvalidConfig {
            message: format!("{parameter} value {value} is out of range (valid: {valid_range})"),
        }
    }

    /// Create a processing error
    pub fn processing<S: Into<String>>(message: S) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    /// Create a file I/O error with the attempted operation and path
    pub fn file_io_error(operation: &str, path: &Path, source: &std::io::Error) -> Self {
        Self::FileIo {
            operation: operation.to_string(),
            path: path.to_path_buf(),
            source: std::io::Error::new(source.kind(), source.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = SpritePrepError::invalid_config("threshold missing");
        assert_eq!(err.to_string(), "Invalid configuration: threshold missing");
    }

    #[test]
    fn test_config_value_error_formats_range() {
        let err = SpritePrepError::config_value_error("JPEG quality", 150, "0-100");
        assert!(err.to_string().contains("150"));
        assert!(err.to_string().contains("0-100"));
    }

    #[test]
    fn test_file_io_error_preserves_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = SpritePrepError::file_io_error("read image file", Path::new("in.jpg"), &io_err);
        let text = err.to_string();
        assert!(text.contains("read image file"));
        assert!(text.contains("in.jpg"));
    }
}
