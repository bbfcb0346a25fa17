//! Storage error types.
//!
//! Persistence is best-effort: callers log these errors and keep their
//! in-memory state authoritative.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O failed for {path}: {message}")]
    Io {
        /// Path of the backing file.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// A record could not be serialized.
    #[error("failed to serialize record '{0}': {1}")]
    Serialize(String, String),

    /// The backing document exists but is not a valid key/value map.
    #[error("storage document is corrupt: {0}")]
    Corrupt(String),

    /// The store refuses writes (e.g. injected fault, read-only medium).
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Returns true if this error came from the filesystem.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if the stored data itself is bad rather than the medium.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Serialize(..) | Self::Corrupt(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Io { .. } => "check that the storage directory is writable",
            Self::Serialize(..) => "report this as a bug",
            Self::Corrupt(_) => "delete the storage file to start over with defaults",
            Self::Unavailable(_) => "settings will apply for this session only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Io {
            path: "/tmp/x.json".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("/tmp/x.json"));
        assert!(err.to_string().contains("permission denied"));

        let err = StorageError::Corrupt("expected object".to_string());
        assert!(err.to_string().contains("expected object"));
    }

    #[test]
    fn test_classification() {
        let io = StorageError::io(
            "/nope",
            &std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(io.is_io_error());
        assert!(!io.is_data_error());

        assert!(StorageError::Corrupt("x".into()).is_data_error());
        assert!(StorageError::Serialize("k".into(), "x".into()).is_data_error());
        assert!(!StorageError::Unavailable("x".into()).is_data_error());
    }

    #[test]
    fn test_suggestion() {
        assert!(StorageError::Corrupt("x".into())
            .suggestion()
            .contains("delete"));
        assert!(StorageError::Unavailable("x".into())
            .suggestion()
            .contains("this session"));
    }
}
