//! PDF merging operations.
//!
//! This module provides the merge core:
//! - Job execution and statistics ([`MergeAssembler`])
//! - Output page tree construction ([`pages::PageTree`])
//! - Outline entries for every input ([`BookmarkManager`])
//! - Best-effort compression ([`compress::compress`])
//!
//! The core is synchronous. [`merge_files`] reads inputs with tokio and runs
//! the job on a blocking thread.
//!
//! # Examples
//!
//! ```no_run
//! use pdflab::config::{Config, MergeOptions};
//! use pdflab::merge::merge_files;
//! use pdflab::output::NoProgress;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     options: MergeOptions::all(),
//!     ..Config::default()
//! };
//!
//! let result = merge_files(&config, NoProgress).await?;
//! println!("Merged {} pages", result.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod bookmarks;
pub mod compress;
pub mod pages;

pub use assembler::{JobState, MergeAssembler, MergeResult, MergeStatistics};
pub use bookmarks::BookmarkManager;
pub use compress::CompressionReport;
pub use pages::PageTree;

use tokio::task;

use crate::config::Config;
use crate::error::{PdfLabError, Result};
use crate::io::read_sources;
use crate::output::progress::ProgressSink;

/// Read the configured inputs and merge them.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the merge job fails.
pub async fn merge_files<P>(config: &Config, mut progress: P) -> Result<MergeResult>
where
    P: ProgressSink + Send + 'static,
{
    let sources = read_sources(&config.inputs).await?;
    let options = config.options;

    task::spawn_blocking(move || MergeAssembler::new().assemble(&sources, &options, &mut progress))
        .await
        .map_err(|e| PdfLabError::other(format!("Merge task failed: {e}")))?
}
