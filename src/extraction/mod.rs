//! Concurrent recursive archive extraction
//!
//! The [`Extractor`] walks a zip archive's entries in encounter order,
//! materializes them under a destination directory, and, when asked,
//! extracts freshly written nested archives on their own tasks while the
//! outer scan continues. One call aggregates its own result with every
//! nested descendant's result: a single failure anywhere folds the whole
//! call to a failed [`ExtractionOutcome`], though files already written stay
//! on disk.

mod shared;
mod zip;


// Re-exports
pub use shared::{derived_destination, is_archive, matches_filters};

use zip::ZipExtractor;

use crate::config::ExtractRequest;
use crate::error::{Error, Result};
use crate::progress::ProgressLog;
use crate::types::{EntryCallback, ExtractionOutcome};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Archive extraction engine
///
/// Holds the collaborators shared across a top-level call and all of its
/// nested descendants: the progress log, the optional per-entry callback,
/// and the cancellation token. Cloning is cheap; nested tasks each get a
/// clone wired to the same collaborators.
///
/// # Example
/// ```no_run
/// use recursive_unzip::{ExtractOptions, ExtractRequest, Extractor, ProgressLog};
///
/// # async fn example() {
/// let progress = ProgressLog::new();
/// let extractor = Extractor::new(progress.clone())
///     .with_entry_callback(|status| println!("{status}"));
///
/// let request = ExtractRequest::new("/sdcard/payload.zip")
///     .with_options(ExtractOptions {
///         include_filters: vec![".apk".into()],
///         extract_nested: true,
///         ..Default::default()
///     });
///
/// let outcome = extractor.extract(request).await;
/// if !outcome.succeeded() {
///     eprintln!("extraction failed: {:?}", outcome.error());
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct Extractor {
    progress: ProgressLog,
    on_entry: Option<EntryCallback>,
    cancel: CancellationToken,
}

impl Extractor {
    /// Create an engine appending to the given progress log
    pub fn new(progress: ProgressLog) -> Self {
        Self {
            progress,
            on_entry: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Install a per-entry callback, invoked once per extracted file before
    /// its bytes are copied
    pub fn with_entry_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_entry = Some(Arc::new(callback));
        self
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this engine's calls when triggered
    ///
    /// Cancellation stops further nested tasks from being spawned and fails
    /// the call; an in-flight byte copy finishes its current entry first.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The shared progress log
    pub fn progress(&self) -> &ProgressLog {
        &self.progress
    }

    /// Extract one archive, honoring the request's destination policy,
    /// filters, nesting, wipe, and delete flags
    ///
    /// This is the failure boundary: no error escapes as `Err`, every
    /// internal failure is folded into [`ExtractionOutcome::Failed`] with
    /// its cause attached.
    pub async fn extract(&self, request: ExtractRequest) -> ExtractionOutcome {
        let source = request.source.clone();
        let outcome: ExtractionOutcome = self.run(request).await.into();

        match &outcome {
            ExtractionOutcome::Completed { files } => {
                info!(?source, file_count = files.len(), "extraction succeeded");
            }
            ExtractionOutcome::Failed { error } => {
                warn!(?source, error = %error, code = error.code(), "extraction failed");
            }
        }

        outcome
    }

    async fn run(&self, request: ExtractRequest) -> Result<Vec<PathBuf>> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let source = request.source.clone();
        let dest = match &request.destination {
            Some(dir) => dir.clone(),
            None => shared::derived_destination(&source)?,
        };

        self.prepare_destination(&dest, request.options.wipe_destination)
            .await?;

        let display_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        self.progress.append(format!("Extracting: {}", display_name));

        // The blocking scan streams nested archive discoveries over this
        // channel; spawning them here overlaps nested extraction with the
        // rest of the outer scan.
        let (nested_tx, mut nested_rx) = mpsc::unbounded_channel::<PathBuf>();

        let scan_handle = {
            let archive_path = source.clone();
            let dest_path = dest.clone();
            let options = request.options.clone();
            let on_entry = self.on_entry.clone();
            let cancel = self.cancel.clone();
            tokio::task::spawn_blocking(move || {
                ZipExtractor::scan(
                    &archive_path,
                    &dest_path,
                    &options,
                    on_entry.as_ref(),
                    &cancel,
                    &nested_tx,
                )
            })
        };

        let mut nested_tasks: JoinSet<(PathBuf, ExtractionOutcome)> = JoinSet::new();
        // Derived destination -> nested source that claimed it, to refuse
        // silent overwrites between siblings sharing a basename.
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut first_failure: Option<Error> = None;

        while let Some(nested_source) = nested_rx.recv().await {
            if self.cancel.is_cancelled() {
                first_failure.get_or_insert(Error::Cancelled);
                continue;
            }

            let nested_dest = match shared::derived_destination(&nested_source) {
                Ok(dir) => dir,
                Err(e) => {
                    first_failure.get_or_insert(e);
                    continue;
                }
            };

            if let Some(previous) = claimed.get(&nested_dest) {
                let error = Error::Collision {
                    path: nested_dest.clone(),
                    reason: format!(
                        "{} and {} derive the same destination",
                        previous.display(),
                        nested_source.display()
                    ),
                };
                warn!(?nested_source, ?nested_dest, "nested destination collision");
                first_failure.get_or_insert(error);
                continue;
            }
            claimed.insert(nested_dest, nested_source.clone());

            info!(?nested_source, "found nested archive, extracting concurrently");
            let nested_request =
                ExtractRequest::nested(&nested_source, &request.options.archive_extensions);
            nested_tasks.spawn(self.nested_future(nested_source, nested_request));
        }

        // Channel closed, so the scan is done producing; collect its result
        // but keep draining nested tasks before finalizing either way.
        let scan_result = match scan_handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::Task {
                reason: format!("scan task failed: {}", e),
            }),
        };

        while let Some(joined) = nested_tasks.join_next().await {
            match joined {
                Ok((nested_source, ExtractionOutcome::Failed { error })) => {
                    first_failure.get_or_insert(Error::Nested {
                        archive: nested_source,
                        source: Box::new(error),
                    });
                }
                Ok((nested_source, ExtractionOutcome::Completed { files })) => {
                    debug!(
                        ?nested_source,
                        file_count = files.len(),
                        "nested extraction finished"
                    );
                }
                Err(e) => {
                    first_failure.get_or_insert(Error::Task {
                        reason: format!("nested task failed: {}", e),
                    });
                }
            }
        }

        let files = scan_result?;
        if let Some(error) = first_failure {
            return Err(error);
        }

        if request.options.delete_source_on_success {
            debug!(?source, "deleting source archive after successful extraction");
            tokio::fs::remove_file(&source)
                .await
                .map_err(|e| Error::Filesystem {
                    path: source.clone(),
                    reason: format!("failed to delete source archive: {}", e),
                })?;
        }

        Ok(files)
    }

    /// Apply the wipe-or-preserve destination policy, then ensure the
    /// destination directory exists before any entry is written
    async fn prepare_destination(&self, dest: &Path, wipe: bool) -> Result<()> {
        if wipe {
            match tokio::fs::remove_dir_all(dest).await {
                Ok(()) => debug!(?dest, "wiped destination directory"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::Filesystem {
                        path: dest.to_path_buf(),
                        reason: format!("failed to wipe destination: {}", e),
                    });
                }
            }
        }

        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| Error::Filesystem {
                path: dest.to_path_buf(),
                reason: format!("failed to create destination: {}", e),
            })
    }

    /// Boxed future for a nested extraction task
    ///
    /// Boxing breaks the type-level recursion of `extract` calling itself
    /// through spawned tasks, the same shape as a boxed recursive async fn.
    fn nested_future(
        &self,
        nested_source: PathBuf,
        request: ExtractRequest,
    ) -> Pin<Box<dyn Future<Output = (PathBuf, ExtractionOutcome)> + Send>> {
        let engine = self.clone();
        Box::pin(async move {
            let outcome = engine.extract(request).await;
            (nested_source, outcome)
        })
    }
}
