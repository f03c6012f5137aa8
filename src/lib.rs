//! # recursive-unzip
//!
//! Concurrent, recursive, selectively-filtered zip extraction library.
//!
//! ## Design Philosophy
//!
//! recursive-unzip is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Observable** - A shared progress log with a live broadcast feed and a
//!   per-file callback, no polling required
//! - **Failure-honest** - One call aggregates its result with every nested
//!   descendant; any failure folds the call to a failed outcome with the
//!   cause and offending path attached, while files already written stay on
//!   disk
//!
//! ## Quick Start
//!
//! ```no_run
//! use recursive_unzip::{ExtractOptions, ExtractRequest, Extractor, ProgressLog};
//!
//! #[tokio::main]
//! async fn main() {
//!     let progress = ProgressLog::new();
//!
//!     // Watch the live feed
//!     let mut feed = progress.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(message) = feed.recv().await {
//!             println!("{message}");
//!         }
//!     });
//!
//!     let extractor = Extractor::new(progress.clone());
//!     let request = ExtractRequest::new("/sdcard/payload.zip")
//!         .with_destination("/sdcard/payload")
//!         .with_options(ExtractOptions {
//!             extract_nested: true,
//!             delete_source_on_success: true,
//!             ..Default::default()
//!         });
//!
//!     let outcome = extractor.extract(request).await;
//!     println!("succeeded: {}", outcome.succeeded());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Archive extraction engine
pub mod extraction;
/// Shared progress log
pub mod progress;
/// Core types and outcomes
pub mod types;

// Re-export commonly used types
pub use config::{ExtractOptions, ExtractRequest};
pub use error::{Error, Result};
pub use extraction::{Extractor, derived_destination, is_archive, matches_filters};
pub use progress::ProgressLog;
pub use types::{EntryCallback, ExtractionOutcome};
