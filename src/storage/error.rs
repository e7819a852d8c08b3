//! Entry store error types

use thiserror::Error;

/// Errors that can occur in the entry store
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite operation failed
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O operation failed (creating the data directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Weight is not a finite positive number
    #[error("Invalid weight: {0} (must be a positive number)")]
    InvalidWeight(f64),

    /// A stored row could not be decoded
    #[error("Corrupt data: {0}")]
    Corrupt(String),

    /// Connection mutex was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::InvalidWeight(-1.0);
        assert_eq!(
            err.to_string(),
            "Invalid weight: -1 (must be a positive number)"
        );

        let err = StorageError::Corrupt("bad date".to_string());
        assert_eq!(err.to_string(), "Corrupt data: bad date");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
