//! Configuration types for recursive-unzip
//!
//! All configuration is caller-supplied per extraction call; there is no
//! config file or environment lookup. [`ExtractOptions`] captures the
//! behavioral switches, [`ExtractRequest`] pairs them with a source archive
//! and a destination policy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Behavioral switches for one extraction call
///
/// The defaults match the additive, non-recursive mode: extract everything,
/// keep the source, merge into an existing destination.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Case-insensitive substring filters; a file entry is extracted iff this
    /// is empty or the entry name contains at least one filter. Directory
    /// entries are always created so the directory skeleton survives
    /// filtering.
    #[serde(default)]
    pub include_filters: Vec<String>,

    /// Extract freshly written files with an archive extension as nested
    /// archives, concurrently with the outer scan
    #[serde(default)]
    pub extract_nested: bool,

    /// Delete the source archive after this call and all nested descendants
    /// succeed
    #[serde(default)]
    pub delete_source_on_success: bool,

    /// Remove the destination tree before extracting (destructive variant);
    /// when false, pre-existing destination contents are preserved and merged
    #[serde(default)]
    pub wipe_destination: bool,

    /// File extensions treated as nested archives (without dots)
    #[serde(default = "default_archive_extensions")]
    pub archive_extensions: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_filters: Vec::new(),
            extract_nested: false,
            delete_source_on_success: false,
            wipe_destination: false,
            archive_extensions: default_archive_extensions(),
        }
    }
}

/// Parameters for one extraction call
///
/// A value object with no identity beyond the call: source archive path,
/// destination policy, and options.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Path to the source archive
    pub source: PathBuf,

    /// Explicit destination directory, or `None` to derive a sibling
    /// directory named after the source's basename with the extension
    /// stripped. Both policies are explicit caller choice.
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Behavioral switches for this call
    #[serde(default)]
    pub options: ExtractOptions,
}

impl ExtractRequest {
    /// Request with the derived-destination policy and default options
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: None,
            options: ExtractOptions::default(),
        }
    }

    /// Set an explicit destination directory
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Replace the options wholesale
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Request for a nested archive discovered during an outer scan
    ///
    /// Filters are cleared so the inner payload extracts in full, nested
    /// discovery stays on so arbitrarily deep nesting keeps unwinding, the
    /// nested source is deleted on success, and the destination is derived
    /// from the nested archive's own name.
    pub(crate) fn nested(source: &Path, archive_extensions: &[String]) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: None,
            options: ExtractOptions {
                include_filters: Vec::new(),
                extract_nested: true,
                delete_source_on_success: true,
                wipe_destination: false,
                archive_extensions: archive_extensions.to_vec(),
            },
        }
    }
}

fn default_archive_extensions() -> Vec<String> {
    vec!["zip".into()]
}
