//! pdflab - Merge PDF files into a single navigable document.
//!
//! This library combines an ordered list of PDFs into one document and can
//! decorate the result with:
//!
//! - Generated table-of-contents pages listing every document's start page
//! - A title (separator) page before each document
//! - Two-digit chapter numbers in front of document names
//! - One outline entry (bookmark) per document
//! - A best-effort compression pass
//!
//! The start page of every document is computed up front by the
//! [`plan::PaginationPlanner`], so the index can be drawn before any input
//! page is copied.
//!
//! # Examples
//!
//! ## Planning
//!
//! ```
//! use pdflab::config::MergeOptions;
//! use pdflab::plan::{InputDocument, PaginationPlanner};
//!
//! let documents = vec![
//!     InputDocument::new("a.pdf", 5, 1),
//!     InputDocument::new("b.pdf", 3, 2),
//!     InputDocument::new("c.pdf", 10, 3),
//! ];
//! let options = MergeOptions { include_index: true, ..MergeOptions::default() };
//!
//! let plan = PaginationPlanner::plan(&documents, &options);
//! assert_eq!(plan.index_page_count, 1);
//! assert_eq!(plan.start_pages(), vec![2, 7, 10]);
//! ```
//!
//! ## Merging
//!
//! ```no_run
//! use pdflab::config::MergeOptions;
//! use pdflab::io::{DocumentSource, PdfWriter};
//! use pdflab::merge::MergeAssembler;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sources = vec![
//!     DocumentSource::from_path(Path::new("a.pdf")).await?,
//!     DocumentSource::from_path(Path::new("b.pdf")).await?,
//! ];
//!
//! let mut report = |fraction: f64, message: &str| println!("{:.0}% {message}", fraction * 100.0);
//! let result = MergeAssembler::new().assemble(&sources, &MergeOptions::all(), &mut report)?;
//!
//! PdfWriter::new().save(&result.bytes, Path::new("fusion_completa.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod plan;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, MergeOptions};
pub use error::{PdfLabError, Result};
pub use merge::{MergeAssembler, MergeResult, MergeStatistics};
pub use plan::{AssemblyPlan, PaginationPlanner};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
