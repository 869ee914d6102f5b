//! I/O operations for pdflab.
//!
//! This module handles everything that touches bytes outside the merge core:
//! - Acquiring document sources (files, readers, in-memory uploads)
//! - Parsing sources into `lopdf` documents and counting their pages
//! - Serializing the merged document and writing it to disk
//!
//! # Examples
//!
//! ```no_run
//! use pdflab::io::{DocumentSource, PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = DocumentSource::from_path(Path::new("input.pdf")).await?;
//! let loaded = PdfReader::new().load(&source)?;
//!
//! let bytes = PdfWriter::new().to_bytes(&mut loaded.document.clone())?;
//! PdfWriter::new().save(&bytes, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod source;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use source::DocumentSource;
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Acquire every input path as a buffered document source, in order.
///
/// # Errors
///
/// Returns the first error encountered; later paths are not read.
pub async fn read_sources(paths: &[PathBuf]) -> Result<Vec<DocumentSource>> {
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        sources.push(DocumentSource::from_path(path).await?);
    }

    Ok(sources)
}

/// Write merged bytes to a file.
///
/// Convenience function using the default (atomic) writer.
pub async fn save_pdf(bytes: &[u8], path: &Path) -> Result<()> {
    let writer = PdfWriter::new();
    writer.save(bytes, path).await
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
