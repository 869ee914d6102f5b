//! PDF parsing and page counting.
//!
//! The reader turns [`DocumentSource`]s into `lopdf` documents. It is used
//! twice per merge: [`PdfReader::inspect_all`] counts pages for planning,
//! and [`PdfReader::reload`] parses each source again when its pages are
//! appended, checking that both reads agree.

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::error::{PdfLabError, Result};
use crate::io::source::DocumentSource;
use crate::plan::InputDocument;

/// A parsed PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// File name of the source.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: u32,

    /// Time taken to parse the document.
    pub load_time: Duration,
}

/// PDF reader for document sources.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse a single source.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLabError::UnreadableDocument`] if:
    /// - The bytes are not a valid PDF
    /// - The PDF is encrypted
    /// - The PDF has no pages
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdflab::io::{DocumentSource, PdfReader};
    /// # fn example(source: DocumentSource) -> Result<(), Box<dyn std::error::Error>> {
    /// let loaded = PdfReader::new().load(&source)?;
    /// println!("Parsed {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(&self, source: &DocumentSource) -> Result<LoadedPdf> {
        let start = Instant::now();

        if source.is_empty() {
            return Err(PdfLabError::unreadable_document(
                source.name(),
                "file is empty",
            ));
        }

        let document = Document::load_mem(source.bytes()).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfLabError::unreadable_document(source.name(), "PDF is encrypted")
            } else {
                PdfLabError::unreadable_document(source.name(), err_msg)
            }
        })?;

        if document.is_encrypted() {
            return Err(PdfLabError::unreadable_document(
                source.name(),
                "PDF is encrypted",
            ));
        }

        let page_count = document.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfLabError::unreadable_document(
                source.name(),
                "PDF has no pages",
            ));
        }

        Ok(LoadedPdf {
            document,
            name: source.name().to_string(),
            page_count,
            load_time: start.elapsed(),
        })
    }

    /// Count the pages of a source.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PdfReader::load`].
    pub fn count_pages(&self, source: &DocumentSource) -> Result<u32> {
        Ok(self.load(source)?.page_count)
    }

    /// First pass: count the pages of every source, in upload order.
    ///
    /// Ordinals are assigned 1-based from the slice position.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable source; the job is all-or-nothing.
    pub fn inspect_all(&self, sources: &[DocumentSource]) -> Result<Vec<InputDocument>> {
        sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let page_count = self.count_pages(source)?;
                tracing::debug!(
                    name = source.name(),
                    page_count,
                    ordinal = idx + 1,
                    "inspected document"
                );
                Ok(InputDocument::new(source.name(), page_count, idx + 1))
            })
            .collect()
    }

    /// Second pass: parse a source again for appending.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLabError::UnreadableDocument`] if the source no longer
    /// parses, or if its page count differs from `expected_pages`, which
    /// would misplace every bookmark and index entry after it.
    pub fn reload(&self, source: &DocumentSource, expected_pages: u32) -> Result<LoadedPdf> {
        let loaded = self.load(source)?;

        if loaded.page_count != expected_pages {
            return Err(PdfLabError::unreadable_document(
                source.name(),
                format!(
                    "page count changed between reads: planned {expected_pages}, found {}",
                    loaded.page_count
                ),
            ));
        }

        Ok(loaded)
    }
}
