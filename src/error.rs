//! Error handling types for the multi-rename engine.
//!
//! This module provides error types used throughout the crate.

use thiserror::Error;

/// Comprehensive error type for rename operations
#[derive(Debug, Error)]
pub enum RenameError {
    /// Diff or attribution post-condition violated; tracking has
    /// desynchronized from the live document
    #[error("Internal consistency error: {message}")]
    InternalConsistency { message: String },

    /// Document not available from the host
    #[error("Document unavailable: {uri}")]
    DocumentUnavailable { uri: String },

    /// The external rename capability failed for one target.
    ///
    /// Earlier targets in the same batch stay applied; `applied` reports
    /// how many so the caller can surface the partial result.
    #[error("Rename failed for target {target_index} ({applied} applied before it): {reason}")]
    RenameFailed {
        target_index: usize,
        applied: usize,
        reason: String,
    },

    /// User input rejected by inline validation
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Host collaborator error
    #[error("Host error: {message}")]
    Host { message: String },
}

/// Result type for rename operations
pub type RenameResult<T> = Result<T, RenameError>;

/// Helper functions for common error patterns
impl RenameError {
    /// Create an internal consistency error
    pub fn internal_consistency(message: impl Into<String>) -> Self {
        RenameError::InternalConsistency {
            message: message.into(),
        }
    }

    /// Create a document unavailable error
    pub fn document_unavailable(uri: impl Into<String>) -> Self {
        RenameError::DocumentUnavailable { uri: uri.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        RenameError::Validation {
            message: message.into(),
        }
    }

    /// Create a host error
    pub fn host(message: impl Into<String>) -> Self {
        RenameError::Host {
            message: message.into(),
        }
    }
}
