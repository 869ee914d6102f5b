//! Best-effort size reduction of the merged document.
//!
//! Merging the same fonts and images from several inputs leaves identical
//! streams behind. The pass folds them together, prunes objects nothing
//! refers to and Flate-compresses content streams. It runs on a copy of the
//! document, which only replaces the original once it passes a structural
//! check.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfLabError, Result};

/// Stream types that must keep their identity.
const PROTECTED_STREAM_TYPES: [&[u8]; 2] = [b"ObjStm", b"XRef"];

/// What the compression pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionReport {
    /// Streams folded into an identical earlier stream.
    pub duplicates_removed: usize,
    /// Objects dropped because nothing referenced them.
    pub objects_pruned: usize,
}

/// Compress `document` in place.
///
/// # Errors
///
/// Returns [`PdfLabError::CompressionFailed`] if the compressed copy lost
/// its catalog or any page. `document` is left untouched in that case.
pub fn compress(document: &mut Document) -> Result<CompressionReport> {
    let expected_pages = document.get_pages().len();
    let mut candidate = document.clone();

    let duplicates_removed = deduplicate_streams(&mut candidate);
    let objects_pruned = candidate.prune_objects().len();
    candidate.compress();

    if candidate.catalog().is_err() {
        return Err(PdfLabError::compression_failed("catalog lost"));
    }

    let pages = candidate.get_pages().len();
    if pages != expected_pages {
        return Err(PdfLabError::compression_failed(format!(
            "page count changed from {expected_pages} to {pages}"
        )));
    }

    *document = candidate;

    Ok(CompressionReport {
        duplicates_removed,
        objects_pruned,
    })
}

/// Point references at one copy of each set of identical streams and drop
/// the rest. Returns the number of streams removed.
fn deduplicate_streams(document: &mut Document) -> usize {
    let mut canonical: HashMap<(String, Vec<u8>), ObjectId> = HashMap::new();
    let mut replaced: BTreeMap<ObjectId, ObjectId> = BTreeMap::new();

    for (&id, object) in &document.objects {
        let Object::Stream(stream) = object else {
            continue;
        };

        let protected = stream
            .dict
            .get(b"Type")
            .and_then(Object::as_name)
            .is_ok_and(|name| PROTECTED_STREAM_TYPES.contains(&name));
        if protected {
            continue;
        }

        let key = (format!("{:?}", stream.dict), stream.content.clone());
        match canonical.get(&key) {
            Some(&first) => {
                replaced.insert(id, first);
            }
            None => {
                canonical.insert(key, id);
            }
        }
    }

    if replaced.is_empty() {
        return 0;
    }

    for object in document.objects.values_mut() {
        remap_references(object, &replaced);
    }
    for (_, value) in document.trailer.iter_mut() {
        remap_references(value, &replaced);
    }
    for id in replaced.keys() {
        document.objects.remove(id);
    }

    tracing::debug!(removed = replaced.len(), "folded duplicate streams");
    replaced.len()
}

fn remap_references(object: &mut Object, replaced: &BTreeMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(&target) = replaced.get(id) {
                *id = target;
            }
        }
        Object::Array(items) => {
            for item in items {
                remap_references(item, replaced);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                remap_references(value, replaced);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                remap_references(value, replaced);
            }
        }
        _ => {}
    }
}
