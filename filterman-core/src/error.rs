//! Error type shared by the store, the codecs and file I/O

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{AreaHandle, SubAreaHandle};

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Error)]
pub enum FilterError {
    /// Structured document could not be read as an area mapping
    #[error("malformed filter document: {reason}")]
    MalformedDocument { reason: String },

    /// Line-oriented file has a record without a usable `area:sub-areas` split
    #[error("malformed filter line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("unknown area {0}")]
    UnknownArea(AreaHandle),

    #[error("sub-area {sub_area} not found in area {area}")]
    NotFound {
        area: AreaHandle,
        sub_area: SubAreaHandle,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FilterError {
    pub(crate) fn malformed_document(reason: impl Into<String>) -> Self {
        FilterError::MalformedDocument {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_line(line: usize, reason: impl Into<String>) -> Self {
        FilterError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// Stable discriminant for callers that report errors outside of Rust
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::MalformedDocument { .. } => "malformed-document",
            FilterError::MalformedLine { .. } => "malformed-line",
            FilterError::UnknownArea(_) => "unknown-area",
            FilterError::NotFound { .. } => "not-found",
            FilterError::Io { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = FilterError::malformed_line(3, "missing ':'");
        assert_eq!(err.code(), "malformed-line");
        assert_eq!(err.to_string(), "malformed filter line 3: missing ':'");

        let err = FilterError::malformed_document("top level is not an object");
        assert_eq!(err.code(), "malformed-document");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = FilterError::Io {
            path: PathBuf::from("/tmp/filters.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.code(), "io");
        assert!(err.to_string().starts_with("/tmp/filters.json"));
    }
}
