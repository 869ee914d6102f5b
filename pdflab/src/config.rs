//! Configuration for pdflab merge jobs.
//!
//! [`MergeOptions`] holds the four independent switches that shape the
//! merged document. [`Config`] wraps them together with the inputs, the
//! output location and the front-end behaviour of a single job.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of entries listed on each generated index page.
pub const ROWS_PER_INDEX_PAGE: usize = 30;

/// Default file name of the merged document.
pub const OUTPUT_FILE_NAME: &str = "fusion_completa.pdf";

/// MIME type of the merged document.
pub const OUTPUT_MIME_TYPE: &str = "application/pdf";

/// Switches that control what the merged document contains.
///
/// Each flag adds its own page-count overhead independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeOptions {
    /// Prepend generated table-of-contents pages.
    pub include_index: bool,

    /// Insert a title page before every document.
    pub include_separators: bool,

    /// Prefix display names with a two-digit chapter number.
    pub number_chapters: bool,

    /// Run the best-effort compression pass before serializing.
    pub compress: bool,
}

impl MergeOptions {
    /// Options with every flag enabled.
    pub fn all() -> Self {
        Self {
            include_index: true,
            include_separators: true,
            number_chapters: true,
            compress: true,
        }
    }

    /// Pages a separator adds in front of each document.
    pub fn separator_cost(&self) -> u32 {
        u32::from(self.include_separators)
    }
}

/// Behavior when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask the user for confirmation.
    #[default]
    Prompt,
    /// Always overwrite without asking.
    Force,
    /// Never overwrite, fail instead.
    NoClobber,
}

/// A complete, validated merge job description.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Content switches for the merged document.
    pub options: MergeOptions,

    /// Dry run mode - read and plan without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from(OUTPUT_FILE_NAME),
            options: MergeOptions::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are given
    /// - Both verbose and quiet are set
    /// - The output path is also one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Whether informational output should be printed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
