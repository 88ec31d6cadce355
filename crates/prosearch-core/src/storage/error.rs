//! Storage error handling
//!
//! Provides typed errors for record file operations with descriptive
//! messages and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Store cannot be created or opened for append
    #[error("Store '{path}' is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read the store
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Store file does not exist
    #[error("Store not found: '{path}'")]
    NotFound { path: PathBuf },

    /// A record could not be parsed into the five document fields
    #[error("Store '{path}' is corrupted at record {record}: {details}")]
    Corrupt {
        path: PathBuf,
        /// 1-based data record number (the header is record 0)
        record: u64,
        details: String,
    },

    /// CSV encoding or decoding failed
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StorageError {
    /// Create an error from an I/O error raised while creating or
    /// appending to the store
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::Unavailable {
                path,
                source: error,
            },
        }
    }

    /// Create an error from an I/O error raised while reading the store
    pub fn from_read_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound { path },
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// Create an error from a CSV error, keeping I/O failures classified
    pub fn from_csv(error: csv::Error, path: PathBuf, reading: bool) -> Self {
        let io_err = match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                io::Error::new(io_err.kind(), io_err.to_string())
            }
            _ => {
                return StorageError::Csv {
                    path,
                    source: error,
                }
            }
        };
        if reading {
            Self::from_read_io(io_err, path)
        } else {
            Self::from_io(io_err, path)
        }
    }

    /// Whether the store could not be written to at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Unavailable { .. }
                | StorageError::CreateDirectory { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::DiskFull { .. }
        )
    }

    /// Whether a stored record failed to parse
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::Corrupt { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StorageError::Corrupt { .. } => {
                Some("Open the store file in a text editor and fix or remove the reported record. Each record needs five fields: id, title, content, tags, date_added.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::from_io(io_err, PathBuf::from("/test/path"));

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.is_unavailable());
        assert!(err.is_recoverable());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_write_failure_is_unavailable() {
        let io_err = io::Error::new(io::ErrorKind::Other, "read-only file system");
        let err = StorageError::from_io(io_err, PathBuf::from("/ro/search_db.csv"));

        assert!(matches!(err, StorageError::Unavailable { .. }));
        assert!(err.is_unavailable());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_read_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = StorageError::from_read_io(io_err, PathBuf::from("/missing/file"));

        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_disk_full_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StorageError::from_io(io_err, PathBuf::from("/full/disk"));

        assert!(matches!(err, StorageError::DiskFull { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_corrupt_display() {
        let err = StorageError::Corrupt {
            path: PathBuf::from("/data/search_db.csv"),
            record: 3,
            details: "expected 5 fields, found 2".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("corrupted"));
        assert!(msg.contains("record 3"));
        assert!(err.is_corrupt());
        assert!(err.recovery_suggestion().is_some());
    }
}
