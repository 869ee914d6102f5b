//! Output formatting and display for pdflab.
//!
//! This module handles all user-facing output: status messages, progress
//! reporting, the dry-run plan table and the summary printed after a merge.
//!
//! # Examples
//!
//! ```no_run
//! use pdflab::output::OutputFormatter;
//! use pdflab::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Reading input files...");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{NoProgress, ProgressBar, ProgressRecorder, ProgressSink, ProgressStyle};

use crate::io::format_file_size;
use crate::merge::MergeStatistics;
use crate::plan::AssemblyPlan;

/// Display an assembly plan as a table of documents and start pages.
pub fn display_plan(formatter: &OutputFormatter, plan: &AssemblyPlan) {
    formatter.section("Assembly plan:");

    if plan.index_page_count > 0 {
        formatter.info(&format!("  Index pages: 1-{}", plan.index_page_count));
    }

    for entry in &plan.entries {
        let start = entry.start_page.to_string();
        let pages = format!("{} page(s)", entry.document.page_count);
        formatter.table_row(&[&start, &entry.display_name, &pages]);
    }

    formatter.blank_line();
    formatter.info(&format!(
        "{} document(s), {} page(s) in total",
        plan.entries.len(),
        plan.total_pages()
    ));
}

/// Display merge statistics to the user.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    if stats.separators_skipped > 0 {
        formatter.warning(&format!(
            "{} separator page(s) could not be rendered and were skipped",
            stats.separators_skipped
        ));
    }

    formatter.info(&format!(
        "Merged {} file(s) in {:.2}s: {} pages",
        stats.files_merged,
        stats.merge_time.as_secs_f64(),
        stats.total_pages
    ));

    formatter.detail("Index pages", &stats.index_pages.to_string());
    formatter.detail("Separator pages", &stats.separators_added.to_string());
    formatter.detail("Bookmarks", &stats.bookmarks_added.to_string());
    formatter.detail("Input size", &format_file_size(stats.input_size));
    formatter.detail("Output size", &format_file_size(stats.output_size));

    if stats.compressed {
        formatter.detail(
            "Compression",
            &format!("{:.1}% smaller", stats.size_reduction_percent()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeOptions;
    use crate::plan::{InputDocument, PaginationPlanner};
    use std::time::Duration;

    #[test]
    fn test_display_plan() {
        let plan = PaginationPlanner::plan(
            &[
                InputDocument::new("a.pdf", 2, 1),
                InputDocument::new("b.pdf", 1, 2),
            ],
            &MergeOptions::all(),
        );

        display_plan(&OutputFormatter::verbose(), &plan);
        display_plan(&OutputFormatter::quiet(), &plan);
    }

    #[test]
    fn test_display_merge_statistics() {
        let stats = MergeStatistics {
            files_merged: 2,
            total_pages: 7,
            index_pages: 1,
            separators_added: 1,
            separators_skipped: 1,
            bookmarks_added: 2,
            compressed: true,
            input_size: 4096,
            output_size: 2048,
            merge_time: Duration::from_millis(30),
        };

        display_merge_statistics(&OutputFormatter::verbose(), &stats);
    }
}
