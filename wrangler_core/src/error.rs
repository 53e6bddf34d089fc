//! Error types for the wrangler core library
//!
//! Fatal errors are grouped into three categories. Recoverable conditions that
//! never abort a scan live in [`ScanWarning`] instead.

use thiserror::Error;

pub mod io;
pub mod scan;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::scan::{ConflictReason, ScanError, ScanWarning};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wrangler core library
///
/// Errors are categorized into three main types:
/// - I/O errors: file system operations that could not be completed
/// - Validation errors: unresolved or out-of-range configuration
/// - Scan errors: the scan itself could not run or was aborted
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Scan related errors
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Whether this error came from an invalid scan root
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::Scan(ScanError::InvalidRoot { .. }))
    }

    /// Whether this error came from a cancelled scan
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Scan(ScanError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_invalid_root_error_creation() {
        let path = Path::new("/non/existent/renders");
        let error = Error::from(ScanError::not_found(path));

        assert!(error.is_invalid_root());
        assert!(!error.is_cancelled());
        match error {
            Error::Scan(ScanError::InvalidRoot { path: error_path, .. }) => {
                assert_eq!(error_path, path.to_path_buf());
            }
            _ => panic!("Expected Scan::InvalidRoot error"),
        }
    }

    #[test]
    fn test_unknown_configuration_error_creation() {
        let error = Error::from(ValidationError::unknown_configuration("recurse_subfolders"));

        match error {
            Error::Validation(ValidationError::UnknownConfiguration { field }) => {
                assert_eq!(field, "recurse_subfolders");
            }
            _ => panic!("Expected Validation::UnknownConfiguration error"),
        }
    }

    #[test]
    fn test_std_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => assert_eq!(io_err.kind, IoErrorKind::PermissionDenied),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::other("disk went away");
        let error: Error = io_error.into();

        // Transparent wrapper forwards source() to the inner IoError
        assert!(error.source().is_some());
    }

    #[test]
    fn test_cancelled_display() {
        let error = Error::from(ScanError::Cancelled);
        assert!(error.is_cancelled());
        assert_eq!(error.to_string(), "Scan cancelled");
    }
}
