//! Merge job execution.
//!
//! A job reads every source once to count pages, plans the layout, then
//! builds the output in a single forward pass: index pages, then for each
//! document an optional separator followed by the document's own pages.
//! Outline entries are resolved once every page is in place, after which
//! the document is optionally compressed and serialized.

use std::time::{Duration, Instant};

use lopdf::ObjectId;

use crate::config::MergeOptions;
use crate::error::{PdfLabError, Result};
use crate::io::{DocumentSource, PdfReader, PdfWriter};
use crate::merge::bookmarks::BookmarkManager;
use crate::merge::compress;
use crate::merge::pages::PageTree;
use crate::output::progress::ProgressSink;
use crate::plan::{AssemblyPlan, PaginationPlanner};
use crate::render::{IndexPageBuilder, SeparatorPageBuilder};

/// Stage of a merge job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobState {
    /// Page counts are known and the layout is fixed.
    Planned,
    /// Index pages have been appended.
    Indexed,
    /// A separator has been appended (or skipped) for the current document.
    Separated,
    /// The outline entry for the current document is registered.
    Bookmarked,
    /// The current document's pages have been appended.
    Appended,
    /// The compression pass has run.
    Compressed,
    /// The output bytes are ready.
    Serialized,
}

impl JobState {
    /// Whether a job may move from `self` to `next`.
    pub fn can_advance_to(self, next: JobState) -> bool {
        use JobState::*;

        matches!(
            (self, next),
            (Planned, Indexed)
                | (Planned | Indexed | Appended, Separated | Bookmarked)
                | (Separated, Bookmarked)
                | (Bookmarked, Appended)
                | (Planned | Indexed | Appended, Compressed | Serialized)
                | (Compressed, Serialized)
        )
    }
}

/// Statistics about a merge job.
#[derive(Debug, Clone, Default)]
pub struct MergeStatistics {
    /// Number of input documents merged.
    pub files_merged: usize,

    /// Total number of pages in the output.
    pub total_pages: usize,

    /// Generated index pages at the front.
    pub index_pages: usize,

    /// Separator pages appended.
    pub separators_added: usize,

    /// Separator pages that failed to render and were left out.
    pub separators_skipped: usize,

    /// Outline entries written.
    pub bookmarks_added: usize,

    /// Whether the compression pass was applied.
    pub compressed: bool,

    /// Total size of the inputs in bytes.
    pub input_size: u64,

    /// Size of the output in bytes.
    pub output_size: u64,

    /// Time taken by the whole job.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// How much smaller the output is than the inputs, in percent.
    ///
    /// Negative when the output grew, which generated pages can cause.
    pub fn size_reduction_percent(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        (1.0 - self.output_size as f64 / self.input_size as f64) * 100.0
    }
}

/// Result of a merge job.
#[derive(Debug)]
pub struct MergeResult {
    /// The serialized output PDF.
    pub bytes: Vec<u8>,

    /// The layout the output was built from.
    pub plan: AssemblyPlan,

    /// Statistics about the job.
    pub statistics: MergeStatistics,
}

/// Runs merge jobs.
#[derive(Debug, Clone, Default)]
pub struct MergeAssembler {
    reader: PdfReader,
    writer: PdfWriter,
    bookmarks: BookmarkManager,
}

impl MergeAssembler {
    /// Create a new assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every source once and compute the layout, without assembling.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLabError::UnreadableDocument`] for the first source
    /// that cannot be parsed.
    pub fn plan(&self, sources: &[DocumentSource], options: &MergeOptions) -> Result<AssemblyPlan> {
        let documents = self.reader.inspect_all(sources)?;
        Ok(PaginationPlanner::plan(&documents, options))
    }

    /// Merge `sources`, in order, into a single PDF.
    ///
    /// `progress` receives a non-decreasing fraction in `[0, 1]`: one report
    /// per document while pages are appended, plus reports for index
    /// generation, compression and completion.
    ///
    /// # Errors
    ///
    /// - [`PdfLabError::UnreadableDocument`] if a source cannot be parsed
    ///   or its page count differs between the two reads
    /// - [`PdfLabError::RenderingFailed`] if the index cannot be drawn
    /// - [`PdfLabError::MergeFailed`] if an input page cannot be copied
    /// - [`PdfLabError::SerializationFailed`] if the output cannot be encoded
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdflab::config::MergeOptions;
    /// # use pdflab::io::DocumentSource;
    /// # use pdflab::merge::MergeAssembler;
    /// # use pdflab::output::NoProgress;
    /// # fn example(sources: Vec<DocumentSource>) -> pdflab::Result<()> {
    /// let result = MergeAssembler::new().assemble(&sources, &MergeOptions::all(), &mut NoProgress)?;
    /// println!("{} pages", result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn assemble(
        &self,
        sources: &[DocumentSource],
        options: &MergeOptions,
        progress: &mut dyn ProgressSink,
    ) -> Result<MergeResult> {
        let start = Instant::now();

        let plan = self.plan(sources, options)?;
        let mut state = JobState::Planned;
        tracing::debug!(
            documents = plan.entries.len(),
            planned_pages = plan.total_pages(),
            "job planned"
        );

        let mut tree = PageTree::new();
        let mut statistics = MergeStatistics {
            files_merged: sources.len(),
            input_size: sources.iter().map(|s| s.len() as u64).sum(),
            ..MergeStatistics::default()
        };

        if options.include_index && !plan.is_empty() {
            progress.on_progress(0.0, "Generating index...");

            let pages = IndexPageBuilder::build(&plan.index_entries())
                .map_err(|e| PdfLabError::rendering_failed("index", e))?;
            for page in &pages {
                tree.append_rendered(page);
            }

            statistics.index_pages = pages.len();
            state = advance(state, JobState::Indexed);
        }

        let total = plan.entries.len();
        let mut outline: Vec<(String, usize)> = Vec::with_capacity(total);

        for (i, (entry, source)) in plan.entries.iter().zip(sources).enumerate() {
            progress.on_progress(
                i as f64 / total as f64,
                &format!("Processing: {}", entry.display_name),
            );

            if options.include_separators {
                match SeparatorPageBuilder::build(&entry.display_name) {
                    Ok(page) => {
                        tree.append_rendered(&page);
                        statistics.separators_added += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            document = %entry.display_name,
                            error = %e,
                            "skipping separator page"
                        );
                        statistics.separators_skipped += 1;
                    }
                }
                state = advance(state, JobState::Separated);
            }

            outline.push((entry.display_name.clone(), entry.bookmark_index()));
            state = advance(state, JobState::Bookmarked);

            let loaded = self.reader.reload(source, entry.document.page_count)?;
            tree.append_document(loaded.document)?;
            state = advance(state, JobState::Appended);
        }

        let outline = resolve_outline(&outline, tree.page_ids());
        let mut document = tree.finish();
        statistics.bookmarks_added = self.bookmarks.add_outline(&mut document, &outline)?;

        if options.compress {
            progress.on_progress(1.0, "Optimizing and compressing...");

            match compress::compress(&mut document) {
                Ok(report) => {
                    tracing::debug!(
                        duplicates_removed = report.duplicates_removed,
                        objects_pruned = report.objects_pruned,
                        "compressed output"
                    );
                    statistics.compressed = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "compression failed, keeping uncompressed output");
                }
            }
            state = advance(state, JobState::Compressed);
        }

        let bytes = self.writer.to_bytes(&mut document)?;
        advance(state, JobState::Serialized);

        statistics.total_pages = document.get_pages().len();
        statistics.output_size = bytes.len() as u64;
        statistics.merge_time = start.elapsed();

        progress.on_progress(1.0, "Done");
        tracing::info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            bytes = statistics.output_size,
            "merge complete"
        );

        Ok(MergeResult {
            bytes,
            plan,
            statistics,
        })
    }
}

fn advance(from: JobState, to: JobState) -> JobState {
    debug_assert!(from.can_advance_to(to), "invalid transition {from:?} -> {to:?}");
    tracing::debug!(?from, ?to, "job state");
    to
}

/// Resolve zero-based page targets to page objects.
///
/// A target past the last page is clamped to it.
fn resolve_outline(entries: &[(String, usize)], pages: &[ObjectId]) -> Vec<(String, ObjectId)> {
    let Some(last) = pages.len().checked_sub(1) else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|(title, index)| {
            if *index > last {
                tracing::warn!(
                    title = %title,
                    target = index,
                    last_page = last,
                    "bookmark target past end of document, clamping"
                );
            }
            (title.clone(), pages[(*index).min(last)])
        })
        .collect()
}
