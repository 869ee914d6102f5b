//! Rewindable document sources.
//!
//! Every input is read twice during a merge: once to count its pages and
//! once to append its content. A [`DocumentSource`] buffers the upload in
//! memory at acquisition time so both reads start from the first byte,
//! whatever the original stream supported.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{PdfLabError, Result};

/// The buffered content of one uploaded PDF and its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    name: String,
    data: Vec<u8>,
}

impl DocumentSource {
    /// Wrap bytes that are already in memory.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Buffer a seekable stream, starting from its beginning.
    ///
    /// The stream is rewound first, so a reader that was already consumed
    /// (for example by an earlier inspection) is captured in full.
    ///
    /// # Errors
    ///
    /// Returns an error if seeking or reading the stream fails.
    pub fn from_reader<R: Read + Seek>(name: impl Into<String>, mut reader: R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        Ok(Self::from_bytes(name, data))
    }

    /// Read a file from disk.
    ///
    /// The source is named after the file name component of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLabError::FileNotFound`] if the path does not exist and
    /// [`PdfLabError::FileNotAccessible`] for any other read failure.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfLabError::file_not_found(path.to_path_buf())
            } else {
                PdfLabError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_bytes(name, data))
    }

    /// The original file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full content, always from the first byte.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
