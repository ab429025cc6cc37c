//! Error types for registry fetches.
//!
//! Follows the What/Why/Fix pattern used across the project. Extractors
//! collapse these into "no data"; only client construction failures
//! reach the caller.

use thiserror::Error;

use super::Resource;

/// Errors that can occur while fetching a registry resource.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout)
    #[error("cannot reach registry for {resource} of '{identifier}': {reason}\n  Suggestion: {suggestion}")]
    Transport {
        /// Identifier being fetched
        identifier: String,
        /// Resource being fetched
        resource: Resource,
        /// Underlying transport failure
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The registry answered with a non-success status
    #[error("registry returned HTTP {status} for {resource} of '{identifier}'")]
    Status {
        /// Identifier being fetched
        identifier: String,
        /// Resource being fetched
        resource: Resource,
        /// HTTP status code
        status: u16,
    },

    /// The response body was not valid JSON
    #[error("unexpected {resource} response format for '{identifier}': {reason}")]
    Parse {
        /// Identifier being fetched
        identifier: String,
        /// Resource being fetched
        resource: Resource,
        /// Parser error text
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client construction failed: {reason}\n  Suggestion: {suggestion}")]
    ClientBuild {
        /// Why construction failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl FetchError {
    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(identifier: &str, resource: Resource, reason: &str) -> Self {
        Self::Transport {
            identifier: identifier.to_string(),
            resource,
            reason: reason.to_string(),
            suggestion: "Check your network connection and the configured base URL".to_string(),
        }
    }

    /// Creates a `Status` error.
    #[must_use]
    pub fn status(identifier: &str, resource: Resource, status: u16) -> Self {
        Self::Status {
            identifier: identifier.to_string(),
            resource,
            status,
        }
    }

    /// Creates a `Parse` error.
    #[must_use]
    pub fn parse(identifier: &str, resource: Resource, reason: &str) -> Self {
        Self::Parse {
            identifier: identifier.to_string(),
            resource,
            reason: reason.to_string(),
        }
    }

    /// Creates a `ClientBuild` error.
    #[must_use]
    pub fn client_build(reason: &str) -> Self {
        Self::ClientBuild {
            reason: reason.to_string(),
            suggestion: "Check proxy environment variables and TLS configuration".to_string(),
        }
    }

    /// Returns true when the failure happened below HTTP (no status received).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
