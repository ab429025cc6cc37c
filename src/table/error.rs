//! Error types for tabular input and output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading identifiers or writing rows.
#[derive(Debug, Error)]
pub enum TableError {
    /// The input has no column with the required header
    #[error("input has no '{column}' column (found: {found})\n  Suggestion: Add a header cell named exactly '{column}' above the identifiers")]
    MissingColumn {
        /// Required header name
        column: String,
        /// Headers that were present, comma separated
        found: String,
    },

    /// The file could not be opened or created
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding or encoding failed
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
}

impl TableError {
    /// Creates a `MissingColumn` error.
    #[must_use]
    pub fn missing_column(column: &str, found: &[String]) -> Self {
        let found = if found.is_empty() {
            "no headers".to_string()
        } else {
            found.join(", ")
        };
        Self::MissingColumn {
            column: column.to_string(),
            found,
        }
    }

    /// Creates an `Io` error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_lists_found_headers() {
        let err = TableError::missing_column("ORCID", &["Name".to_string(), "Email".to_string()]);
        let msg = err.to_string();
        assert!(msg.contains("'ORCID'"), "should name the column");
        assert!(msg.contains("Name, Email"), "should list found headers");
        assert!(msg.contains("Suggestion"), "should have suggestion");
    }

    #[test]
    fn test_missing_column_message_without_headers() {
        let err = TableError::missing_column("ORCID", &[]);
        assert!(err.to_string().contains("no headers"));
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = TableError::io(
            "/nope/in.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("/nope/in.csv"));
    }
}
