//! Error types for pdflab.
//!
//! A merge job either succeeds or fails with exactly one of these errors.
//! Errors carry enough context to produce a single human-readable message
//! for the front end.
//!
//! # Error Categories
//!
//! - **Input Errors**: unreadable, corrupt or empty documents
//! - **Rendering Errors**: the generated index could not be drawn
//! - **Output Errors**: serialization or disk write failures
//! - **Front-end Errors**: invalid configuration, existing output, cancellation

use std::io;
use std::path::PathBuf;

use crate::render::RenderError;

/// Result type alias for pdflab operations.
pub type Result<T> = std::result::Result<T, PdfLabError>;

/// Main error type for pdflab operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfLabError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file exists but could not be read.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An input could not be parsed as a PDF, or has no pages.
    #[error("Unreadable document: {name}\n  Reason: {reason}")]
    UnreadableDocument {
        /// File name of the offending upload.
        name: String,
        /// Why the document was rejected.
        reason: String,
    },

    /// A generated page could not be rendered.
    #[error("Failed to render {what}\n  Reason: {source}")]
    RenderingFailed {
        /// Which generated page failed ("index", "separator for ...").
        what: String,
        /// Underlying rendering error.
        source: RenderError,
    },

    /// Merge operation failed while building the output page tree.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The compression pass produced an inconsistent document.
    ///
    /// Never returned from a merge job; the assembler falls back to the
    /// uncompressed document.
    #[error("Compression failed: {reason}")]
    CompressionFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The merged document could not be serialized.
    #[error("Failed to serialize merged PDF\n  Reason: {reason}")]
    SerializationFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for PdfLabError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfLabError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create an UnreadableDocument error.
    pub fn unreadable_document(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableDocument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderingFailed error.
    pub fn rendering_failed(what: impl Into<String>, source: RenderError) -> Self {
        Self::RenderingFailed {
            what: what.into(),
            source,
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a CompressionFailed error.
    pub fn compression_failed(reason: impl Into<String>) -> Self {
        Self::CompressionFailed {
            reason: reason.into(),
        }
    }

    /// Create a SerializationFailed error.
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::SerializationFailed {
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error aborts a merge job.
    ///
    /// Compression failures are the only error the assembler absorbs.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::CompressionFailed { .. })
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::UnreadableDocument { .. } => 3,
            Self::RenderingFailed { .. } => 6,
            Self::MergeFailed { .. } => 6,
            Self::CompressionFailed { .. } => 6,
            Self::SerializationFailed { .. } => 5,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
