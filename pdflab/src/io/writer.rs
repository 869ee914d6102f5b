//! PDF serialization and saving.
//!
//! Serialization of the merged document happens in memory
//! ([`PdfWriter::to_bytes`]); the resulting byte stream is what a merge job
//! delivers. Writing those bytes to disk is a separate, front-end step with:
//! - Atomic writes (write to temp file, then rename)
//! - Pre-flight checks for the output directory
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdflab::io::writer::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&bytes, Path::new("fusion_completa.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfLabError, Result};
use crate::io::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Serialize a document into an in-memory PDF byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLabError::SerializationFailed`] if `lopdf` cannot write
    /// the document.
    pub fn to_bytes(&self, doc: &mut Document) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.options.buffer_size);

        doc.save_to(&mut buffer)
            .map_err(|e| PdfLabError::serialization_failed(e.to_string()))?;

        Ok(buffer)
    }

    /// Save a serialized PDF to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output directory doesn't exist
    /// - Insufficient permissions
    /// - Disk full
    pub async fn save(&self, bytes: &[u8], path: &Path) -> Result<()> {
        let _stats = self.save_with_stats(bytes, path).await?;
        Ok(())
    }

    /// Save a serialized PDF and return statistics about the operation.
    pub async fn save_with_stats(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let bytes = bytes.to_vec();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            let write_path = if options.atomic {
                path_buf.with_extension("tmp")
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|e| {
                PdfLabError::FailedToWrite {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            writer
                .write_all(&bytes)
                .and_then(|_| writer.flush())
                .map_err(|e| PdfLabError::FailedToWrite {
                    path: write_path.clone(),
                    source: e,
                })?;

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    PdfLabError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfLabError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfLabError::other(format!("Write task failed: {e}")))??;

        tracing::debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            "wrote merged document"
        );

        Ok(stats)
    }

    /// Check if a file can be written to the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
                PdfLabError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                ))
            })?;

            if metadata.permissions().readonly() {
                return Err(PdfLabError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
