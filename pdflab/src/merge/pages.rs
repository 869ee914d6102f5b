//! Output page tree construction.
//!
//! [`PageTree`] owns the output document while a job runs. Generated pages
//! and the pages of each input document are appended in order under a
//! single flat `Pages` node; everything else an input page needs (content
//! streams, resources, annotations) is copied along with it.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::error::{PdfLabError, Result};
use crate::render::{RenderedPage, font_resources};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed inputs.
const MAX_TREE_DEPTH: usize = 64;

/// Builder for the merged document's page tree.
pub struct PageTree {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    /// Resources shared by every generated page, created on first use.
    generated_resources: Option<ObjectId>,
}

impl PageTree {
    /// Create an empty output document with a catalog and a `Pages` root.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");

        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }
            .into(),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            generated_resources: None,
        }
    }

    /// Append a generated page and return its object id.
    pub fn append_rendered(&mut self, page: &RenderedPage) -> ObjectId {
        let resources_id = match self.generated_resources {
            Some(id) => id,
            None => {
                let id = self.document.add_object(font_resources());
                self.generated_resources = Some(id);
                id
            }
        };

        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), page.content.clone()));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => RenderedPage::media_box(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });

        self.page_ids.push(page_id);
        page_id
    }

    /// Append every page of `source`, in page order.
    ///
    /// Returns the number of pages appended.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLabError::MergeFailed`] if a page object of `source`
    /// is not a dictionary.
    pub fn append_document(&mut self, mut source: Document) -> Result<usize> {
        source.renumber_objects_with(self.document.max_id + 1);

        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();

        // Pages go in first so references between them resolve to the
        // rewritten copies instead of dragging in the source page tree.
        for &page_id in &source_pages {
            let page = self.adopt_page(&source, page_id)?;
            self.document.objects.insert(page_id, Object::Dictionary(page));
        }

        for &page_id in &source_pages {
            let roots: Vec<Object> = match self.document.get_dictionary(page_id) {
                Ok(page) => page
                    .iter()
                    .filter(|(key, _)| key.as_slice() != b"Parent")
                    .map(|(_, value)| value.clone())
                    .collect(),
                Err(_) => Vec::new(),
            };
            for root in roots {
                self.import_references(&source, root);
            }
        }

        self.document.max_id = self.document.max_id.max(source.max_id);
        self.page_ids.extend(&source_pages);

        Ok(source_pages.len())
    }

    /// Copy of a source page re-parented under this tree, with inherited
    /// attributes made explicit.
    fn adopt_page(&self, source: &Document, page_id: ObjectId) -> Result<Dictionary> {
        let mut page = source
            .get_dictionary(page_id)
            .map_err(|e| {
                PdfLabError::merge_failed(format!("page {page_id:?} is not a dictionary: {e}"))
            })?
            .clone();

        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key)
                && let Some(value) = inherited_attribute(source, &page, key)
            {
                page.set(key, value);
            }
        }

        page.set("Parent", self.pages_id);
        Ok(page)
    }

    /// Copy every object reachable from `root` that is not yet present.
    fn import_references(&mut self, source: &Document, root: Object) {
        let mut pending = vec![root];

        while let Some(object) = pending.pop() {
            match object {
                Object::Reference(id) => {
                    if self.document.objects.contains_key(&id) {
                        continue;
                    }
                    if let Ok(referenced) = source.get_object(id) {
                        self.document.objects.insert(id, referenced.clone());
                        pending.push(referenced.clone());
                    }
                }
                Object::Array(items) => pending.extend(items),
                Object::Dictionary(dict) => {
                    pending.extend(dict.iter().map(|(_, value)| value.clone()));
                }
                Object::Stream(stream) => {
                    pending.extend(stream.dict.iter().map(|(_, value)| value.clone()));
                }
                _ => {}
            }
        }
    }

    /// Object ids of all appended pages, in output order.
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    /// Number of appended pages.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Write the `Kids` and `Count` of the root node and return the document.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let count = kids.len() as i64;

        if let Ok(Object::Dictionary(pages)) = self.document.get_object_mut(self.pages_id) {
            pages.set("Kids", kids);
            pages.set("Count", count);
        }

        self.document
    }
}

impl Default for PageTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest ancestor's value for `key`, following `Parent` links.
fn inherited_attribute(source: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut node = page;

    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = source.get_dictionary(parent_id).ok()?;

        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
    }

    None
}
