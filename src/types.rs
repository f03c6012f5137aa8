//! Core types for recursive-unzip

use crate::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-entry progress callback
///
/// Invoked once per extracted file entry, before the entry's bytes are
/// copied, with a human-readable status line. Shared across the spawned
/// nested extraction tasks, so it must be `Send + Sync`.
pub type EntryCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Aggregate result of one extraction call and all of its nested descendants
///
/// The original design collapsed everything to a boolean; this keeps that
/// view ([`ExtractionOutcome::succeeded`]) while attaching the failure cause
/// and the list of files written on success. A single nested failure folds
/// the whole call to `Failed`, but files already written by the call or by
/// sibling nested extractions are left on disk.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// The call and every nested descendant succeeded
    Completed {
        /// Files written by this call, excluding files written by nested
        /// tasks into their own destinations
        files: Vec<PathBuf>,
    },

    /// The call, or at least one nested descendant, failed
    Failed {
        /// The first failure cause encountered
        error: Error,
    },
}

impl ExtractionOutcome {
    /// Degenerate boolean view of the aggregate outcome
    pub fn succeeded(&self) -> bool {
        matches!(self, ExtractionOutcome::Completed { .. })
    }

    /// The failure cause, if the call failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            ExtractionOutcome::Completed { .. } => None,
            ExtractionOutcome::Failed { error } => Some(error),
        }
    }

    /// Files written by this call, empty on failure
    pub fn files(&self) -> &[PathBuf] {
        match self {
            ExtractionOutcome::Completed { files } => files,
            ExtractionOutcome::Failed { .. } => &[],
        }
    }
}

impl From<crate::error::Result<Vec<PathBuf>>> for ExtractionOutcome {
    fn from(result: crate::error::Result<Vec<PathBuf>>) -> Self {
        match result {
            Ok(files) => ExtractionOutcome::Completed { files },
            Err(error) => ExtractionOutcome::Failed { error },
        }
    }
}
