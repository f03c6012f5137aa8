//! Error types for recursive-unzip
//!
//! This module provides the failure taxonomy for extraction calls:
//! - Open failures (missing, unreadable, or corrupt source archives)
//! - Filesystem failures (directory creation, file creation, byte copy)
//! - Nested failures propagated from concurrently extracted inner archives
//! - Structural failures (destination collisions, unusable paths)
//!
//! Errors never cross the public `extract` boundary; they are folded into
//! [`ExtractionOutcome`](crate::types::ExtractionOutcome) with the originating
//! cause attached.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for recursive-unzip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for recursive-unzip
///
/// Each variant carries the offending path where one exists, so callers can
/// report which archive or filesystem location failed rather than a bare
/// boolean.
#[derive(Debug, Error)]
pub enum Error {
    /// Source archive could not be opened or is not a valid zip stream
    #[error("failed to open archive {archive}: {reason}")]
    Open {
        /// The archive file that could not be opened
        archive: PathBuf,
        /// Why the open failed (missing file, corrupt central directory, etc.)
        reason: String,
    },

    /// Directory creation, file creation, or byte copy failed
    #[error("filesystem error at {path}: {reason}")]
    Filesystem {
        /// The filesystem location that failed
        path: PathBuf,
        /// The underlying I/O failure
        reason: String,
    },

    /// A concurrently extracted nested archive reported failure
    #[error("nested extraction failed for {archive}: {source}")]
    Nested {
        /// The nested archive whose extraction failed
        archive: PathBuf,
        /// The child call's failure cause
        #[source]
        source: Box<Error>,
    },

    /// Two sibling nested archives derived the same destination directory
    #[error("destination collision at {path}: {reason}")]
    Collision {
        /// The derived destination both archives wanted
        path: PathBuf,
        /// Which basenames collided
        reason: String,
    },

    /// A path could not be turned into a usable destination
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The path that was rejected
        path: PathBuf,
        /// Why the path is unusable (no basename, not a file name, etc.)
        reason: String,
    },

    /// The cancellation token fired before or during the call
    #[error("extraction cancelled")]
    Cancelled,

    /// A spawned extraction task panicked or was aborted by the runtime
    #[error("extraction task failed: {reason}")]
    Task {
        /// The join error reported by the runtime
        reason: String,
    },
}

impl Error {
    /// Machine-readable error code for this failure cause
    ///
    /// Stable strings suitable for logging pipelines or UI-layer dispatch;
    /// the `Display` impl remains the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Open { .. } => "open_failed",
            Error::Filesystem { .. } => "filesystem_error",
            Error::Nested { .. } => "nested_failed",
            Error::Collision { .. } => "destination_collision",
            Error::InvalidPath { .. } => "invalid_path",
            Error::Cancelled => "cancelled",
            Error::Task { .. } => "task_failed",
        }
    }

    /// The deepest non-`Nested` cause in a propagation chain
    ///
    /// A failure three archives deep arrives wrapped in one `Nested` layer
    /// per level; this walks to the original cause.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
