//! Pagination planning.
//!
//! The planner resolves, before any page is assembled, where every input
//! document will start in the merged output. Index pages come first and
//! their number depends only on how many documents there are, so the whole
//! layout is settled in one forward pass over the documents.
//!
//! # Examples
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
//! let options = MergeOptions { include_separators: true, ..MergeOptions::default() };
//!
//! let plan = PaginationPlanner::plan(&documents, &options);
//! assert_eq!(plan.start_pages(), vec![1, 7, 11]);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{MergeOptions, ROWS_PER_INDEX_PAGE};

/// One input document as seen by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDocument {
    /// Original file name.
    pub name: String,

    /// Number of pages, always at least one for a readable document.
    pub page_count: u32,

    /// 1-based position in the upload order.
    pub ordinal: usize,
}

impl InputDocument {
    /// Create a planner input.
    pub fn new(name: impl Into<String>, page_count: u32, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            page_count,
            ordinal,
        }
    }
}

/// A `(display name, start page)` row of the generated index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Name shown in the index and the outline.
    pub display_name: String,

    /// 1-based page where the document starts.
    pub start_page: u32,
}

/// Placement of one input document in the merged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// The planned document.
    #[serde(flatten)]
    pub document: InputDocument,

    /// 1-based page of the document's first slot (its separator, if any).
    pub start_page: u32,

    /// Full display name, never truncated.
    pub display_name: String,
}

impl PlanEntry {
    /// Zero-based page index the outline entry points at.
    pub fn bookmark_index(&self) -> usize {
        self.start_page as usize - 1
    }

    /// The index row for this entry.
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            display_name: self.display_name.clone(),
            start_page: self.start_page,
        }
    }
}

/// The fully resolved layout of a merge job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyPlan {
    /// Number of generated index pages at the front of the output.
    pub index_page_count: u32,

    /// One entry per input document, in upload order.
    pub entries: Vec<PlanEntry>,

    /// Whether a separator page precedes every document.
    pub include_separators: bool,
}

impl AssemblyPlan {
    /// Start pages of all entries, in order.
    pub fn start_pages(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.start_page).collect()
    }

    /// Rows for the generated index.
    pub fn index_entries(&self) -> Vec<IndexEntry> {
        self.entries.iter().map(PlanEntry::index_entry).collect()
    }

    /// Page count of the output when every generated page renders.
    pub fn total_pages(&self) -> u32 {
        let separators = if self.include_separators {
            self.entries.len() as u32
        } else {
            0
        };
        let documents: u32 = self.entries.iter().map(|e| e.document.page_count).sum();

        self.index_page_count + separators + documents
    }

    /// Whether the plan has no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Number of index pages needed for `document_count` entries.
///
/// Zero documents need zero pages, so an empty job never renders an index.
pub fn index_page_count(document_count: usize) -> u32 {
    document_count.div_ceil(ROWS_PER_INDEX_PAGE) as u32
}

/// Name shown for a document in the index, the outline and its separator.
pub fn display_name(document: &InputDocument, number_chapters: bool) -> String {
    if number_chapters {
        format!("{:02}. {}", document.ordinal, document.name)
    } else {
        document.name.clone()
    }
}

/// Computes assembly plans.
pub struct PaginationPlanner;

impl PaginationPlanner {
    /// Plan the layout of `documents` under `options`.
    ///
    /// Documents must already be in upload order.
    pub fn plan(documents: &[InputDocument], options: &MergeOptions) -> AssemblyPlan {
        let index_pages = if options.include_index {
            index_page_count(documents.len())
        } else {
            0
        };

        let mut current_page = index_pages + 1;
        let mut entries = Vec::with_capacity(documents.len());

        for document in documents {
            let display_name = display_name(document, options.number_chapters);

            tracing::debug!(
                ordinal = document.ordinal,
                start_page = current_page,
                display_name = %display_name,
                "planned document"
            );

            entries.push(PlanEntry {
                document: document.clone(),
                start_page: current_page,
                display_name,
            });

            current_page += options.separator_cost() + document.page_count;
        }

        AssemblyPlan {
            index_page_count: index_pages,
            entries,
            include_separators: options.include_separators,
        }
    }
}
