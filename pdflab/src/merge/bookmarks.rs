//! Bookmark (outline) management for merged documents.
//!
//! Every input document gets one top-level outline entry titled with its
//! display name. Titles are written as PDF text strings: plain ASCII stays
//! a literal string, anything else becomes UTF-16BE with a byte order mark.

use crate::error::{PdfLabError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Manager for PDF bookmarks (outlines).
#[derive(Debug, Clone, Default)]
pub struct BookmarkManager;

impl BookmarkManager {
    /// Create a new bookmark manager.
    pub fn new() -> Self {
        Self
    }

    /// Replace the document outline with one flat entry per `(title, page)`.
    ///
    /// Returns the number of entries written. An empty list leaves the
    /// document without an outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no catalog.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdflab::merge::bookmarks::BookmarkManager;
    /// # use lopdf::{Document, ObjectId};
    /// # fn example(mut doc: Document, first: ObjectId, second: ObjectId) -> Result<(), Box<dyn std::error::Error>> {
    /// let items = vec![("01. a.pdf".to_string(), first), ("02. b.pdf".to_string(), second)];
    /// BookmarkManager::new().add_outline(&mut doc, &items)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_outline(&self, doc: &mut Document, items: &[(String, ObjectId)]) -> Result<usize> {
        if items.is_empty() {
            self.remove_bookmarks(doc);
            return Ok(0);
        }

        let outline_id = doc.new_object_id();
        let item_ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

        for (i, ((title, page_id), &item_id)) in items.iter().zip(&item_ids).enumerate() {
            let dest = vec![
                Object::Reference(*page_id),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ];

            let mut item = Dictionary::new();
            item.set("Title", text_string(title));
            item.set("Parent", outline_id);
            item.set("Dest", dest);
            if i > 0 {
                item.set("Prev", item_ids[i - 1]);
            }
            if let Some(&next) = item_ids.get(i + 1) {
                item.set("Next", next);
            }

            doc.objects.insert(item_id, Object::Dictionary(item));
        }

        let mut outline = Dictionary::new();
        outline.set("Type", Object::Name(b"Outlines".to_vec()));
        outline.set("Count", item_ids.len() as i64);
        if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
            outline.set("First", first);
            outline.set("Last", last);
        }
        doc.objects.insert(outline_id, Object::Dictionary(outline));

        let catalog = doc
            .catalog_mut()
            .map_err(|e| PdfLabError::merge_failed(format!("Failed to get catalog: {e}")))?;
        catalog.set("Outlines", outline_id);
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        Ok(item_ids.len())
    }

    /// Check if a document has bookmarks.
    pub fn has_bookmarks(&self, doc: &Document) -> bool {
        doc.catalog().is_ok_and(|catalog| catalog.has(b"Outlines"))
    }

    /// Top-level outline entries as `(title, target page)`, in order.
    pub fn outline_entries(&self, doc: &Document) -> Vec<(String, ObjectId)> {
        let mut entries = Vec::new();

        let Some(mut next) = doc
            .catalog()
            .and_then(|c| c.get(b"Outlines"))
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .and_then(|outline| outline.get(b"First"))
            .and_then(Object::as_reference)
            .ok()
        else {
            return entries;
        };

        // Bounded by the object count so a cyclic Next chain terminates.
        for _ in 0..doc.objects.len() {
            let Ok(item) = doc.get_dictionary(next) else {
                break;
            };

            let title = item
                .get(b"Title")
                .ok()
                .and_then(|t| t.as_str().ok())
                .map(decode_text_string)
                .unwrap_or_default();
            let target = item
                .get(b"Dest")
                .and_then(Object::as_array)
                .ok()
                .and_then(|dest| dest.first())
                .and_then(|page| page.as_reference().ok());

            if let Some(target) = target {
                entries.push((title, target));
            }

            match item.get(b"Next").and_then(Object::as_reference) {
                Ok(id) => next = id,
                Err(_) => break,
            }
        }

        entries
    }

    /// Remove all bookmarks from a document.
    pub fn remove_bookmarks(&self, doc: &mut Document) {
        if let Ok(catalog) = doc.catalog_mut() {
            catalog.remove(b"Outlines");
        }
    }
}

/// Encode `text` as a PDF text string.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = UTF16_BOM.to_vec();
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string written by [`text_string`] or a PDFDoc literal.
fn decode_text_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&UTF16_BOM) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().map(|&b| b as char).collect(),
    }
}
