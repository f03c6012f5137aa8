use crate::config::ExtractOptions;
use crate::error::{Error, Result};
use crate::types::EntryCallback;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::shared::{is_archive, matches_filters};

/// Blocking zip scanner
///
/// Walks a zip archive's entries in encounter order and materializes them
/// under the destination directory. Runs on the blocking thread pool; nested
/// archive discoveries are streamed to the async orchestrator through a
/// channel so their extraction can start while this scan continues.
pub(crate) struct ZipExtractor;

impl ZipExtractor {
    /// Scan an archive and extract its entries
    ///
    /// Directory entries are created unconditionally so the directory
    /// skeleton survives filtering; file entries are written only when they
    /// pass the include filters. Freshly written files with an archive
    /// extension are reported on `nested_tx` when nested extraction is
    /// enabled.
    ///
    /// Returns the files written by this scan, excluding anything nested
    /// tasks write into their own destinations.
    pub(crate) fn scan(
        archive_path: &Path,
        dest_path: &Path,
        options: &ExtractOptions,
        on_entry: Option<&EntryCallback>,
        cancel: &CancellationToken,
        nested_tx: &UnboundedSender<PathBuf>,
    ) -> Result<Vec<PathBuf>> {
        debug!(?archive_path, ?dest_path, "scanning archive");

        let file = std::fs::File::open(archive_path).map_err(|e| Error::Open {
            archive: archive_path.to_path_buf(),
            reason: format!("failed to open archive: {}", e),
        })?;

        let mut archive = zip::ZipArchive::new(file).map_err(|e| Error::Open {
            archive: archive_path.to_path_buf(),
            reason: format!("failed to read zip stream: {}", e),
        })?;

        let mut extracted_files = Vec::new();

        for i in 0..archive.len() {
            if cancel.is_cancelled() {
                debug!(?archive_path, entry = i, "cancellation observed mid-scan");
                return Err(Error::Cancelled);
            }

            let mut entry = archive.by_index(i).map_err(|e| Error::Open {
                archive: archive_path.to_path_buf(),
                reason: format!("failed to read entry {}: {}", i, e),
            })?;

            let entry_name = entry.name().to_string();

            // Entry names are attacker-controlled; anything that would land
            // outside the destination is skipped rather than written.
            let entry_path = match entry.enclosed_name() {
                Some(path) => dest_path.join(path),
                None => {
                    warn!(?archive_path, entry = %entry_name, "skipping entry with unsafe path");
                    continue;
                }
            };

            if entry.is_dir() {
                // Directory skeleton is preserved even when filters drop the
                // files inside it.
                std::fs::create_dir_all(&entry_path).map_err(|e| Error::Filesystem {
                    path: entry_path.clone(),
                    reason: format!("failed to create directory: {}", e),
                })?;
                continue;
            }

            if !matches_filters(&entry_name, &options.include_filters) {
                continue;
            }

            if let Some(parent) = entry_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                    path: parent.to_path_buf(),
                    reason: format!("failed to create parent directories: {}", e),
                })?;
            }

            if let Some(callback) = on_entry {
                callback(&format!("Extracting {}...", entry_name));
            }

            let mut outfile = std::fs::File::create(&entry_path).map_err(|e| Error::Filesystem {
                path: entry_path.clone(),
                reason: format!("failed to create output file: {}", e),
            })?;

            std::io::copy(&mut entry, &mut outfile).map_err(|e| Error::Filesystem {
                path: entry_path.clone(),
                reason: format!("failed to copy entry bytes: {}", e),
            })?;

            if options.extract_nested && is_archive(&entry_path, &options.archive_extensions) {
                // Receiver dropping means the orchestrator stopped taking
                // discoveries; the scan itself keeps going.
                nested_tx.send(entry_path.clone()).ok();
            }

            extracted_files.push(entry_path);
        }

        info!(
            ?archive_path,
            extracted_count = extracted_files.len(),
            "archive scan complete"
        );

        Ok(extracted_files)
    }
}
