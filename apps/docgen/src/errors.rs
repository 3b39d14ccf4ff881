use std::path::PathBuf;

use thiserror::Error;

/// Library-level error type.
/// Every formatter operation returns `Result<T, DocgenError>`; the binary wraps it in `anyhow`.
#[derive(Debug, Error)]
pub enum DocgenError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(i64),

    #[error("Ambiguous profile {id}: {count} rows match")]
    AmbiguousProfile { id: i64, count: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document packaging failed: {0}")]
    Packaging(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

impl DocgenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocgenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Profile lookup failed: no match, or more than one.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            DocgenError::ProfileNotFound(_) | DocgenError::AmbiguousProfile { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DocgenError::Validation(_))
    }

    /// Directory creation, file creation, or archive serialization failed.
    pub fn is_io(&self) -> bool {
        matches!(self, DocgenError::Io { .. } | DocgenError::Packaging(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_classification() {
        assert!(DocgenError::ProfileNotFound(7).is_lookup());
        assert!(DocgenError::AmbiguousProfile { id: 7, count: 2 }.is_lookup());
        assert!(!DocgenError::Validation("x".into()).is_lookup());
    }

    #[test]
    fn test_io_classification() {
        let err = DocgenError::io(
            "/nope/out.docx",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_io());
        assert!(DocgenError::Packaging("zip".into()).is_io());
        assert!(!err.is_lookup());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DocgenError::ProfileNotFound(42).to_string(),
            "Profile not found: 42"
        );
        assert_eq!(
            DocgenError::AmbiguousProfile { id: 42, count: 3 }.to_string(),
            "Ambiguous profile 42: 3 rows match"
        );
    }
}
