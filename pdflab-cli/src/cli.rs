//! CLI argument parsing for pdflab.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! only depends on `clap` and the `pdflab` library.

use clap::Parser;
use std::path::PathBuf;

use pdflab::config::{Config, MergeOptions, OUTPUT_FILE_NAME, OverwriteMode};
use pdflab::error::{PdfLabError, Result};
use pdflab::utils::collect_paths_for_patterns;

/// Merge PDF files into a single navigable document.
///
/// pdflab concatenates PDFs in the order given and adds one bookmark per
/// document. It can also prepend a table of contents, insert a title page
/// before every document, and number documents as chapters.
#[derive(Parser, Debug)]
#[command(name = "pdflab")]
#[command(version)]
#[command(about = "Merge PDF files into a single navigable document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Glob patterns are expanded; the matches of each pattern are
    /// merged in sorted order.
    ///
    /// Examples:
    ///   pdflab cover.pdf body.pdf
    ///   pdflab --index --separators chapters/*.pdf -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = OUTPUT_FILE_NAME)]
    pub output: PathBuf,

    /// Prepend table-of-contents pages listing each document's start page
    #[arg(long, env = "PDFLAB_INDEX")]
    pub index: bool,

    /// Insert a title page before each document
    #[arg(long, env = "PDFLAB_SEPARATORS")]
    pub separators: bool,

    /// Prefix document names with a two-digit chapter number ("01. ")
    #[arg(long, env = "PDFLAB_NUMBER_CHAPTERS")]
    pub number_chapters: bool,

    /// Deduplicate and compress the output (best effort)
    #[arg(long, env = "PDFLAB_COMPRESS")]
    pub compress: bool,

    /// Dry run - read inputs and print the page plan without creating output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Verbose output - show statistics and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The content switches selected on the command line.
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            include_index: self.index,
            include_separators: self.separators,
            number_chapters: self.number_chapters,
            compress: self.compress,
        }
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// Input patterns are expanded here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A glob pattern is invalid
    /// - No input file remains after expansion
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs: collect_paths_for_patterns(&self.inputs)?,
            output: self.output.clone(),
            options: self.merge_options(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
        };

        config.validate().map_err(|e| {
            PdfLabError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error if no input is given or `--json` is used without
    /// `--dry-run`.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfLabError::invalid_config("No input files specified"));
        }

        if self.json && !self.dry_run {
            return Err(PdfLabError::invalid_config("--json requires --dry-run"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pdflab").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["a.pdf", "b.pdf"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.inputs, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
        assert_eq!(config.output, PathBuf::from("fusion_completa.pdf"));
        assert_eq!(config.options, MergeOptions::default());
        assert_eq!(config.overwrite_mode, OverwriteMode::Prompt);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_option_flags() {
        let cli = parse(&[
            "--index",
            "--separators",
            "--number-chapters",
            "--compress",
            "a.pdf",
        ]);
        assert_eq!(cli.merge_options(), MergeOptions::all());
    }

    #[rstest]
    #[case(&["-f", "a.pdf"], OverwriteMode::Force)]
    #[case(&["--no-clobber", "a.pdf"], OverwriteMode::NoClobber)]
    #[case(&["a.pdf"], OverwriteMode::Prompt)]
    fn test_overwrite_modes(#[case] args: &[&str], #[case] expected: OverwriteMode) {
        assert_eq!(parse(args).to_config().unwrap().overwrite_mode, expected);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from(["pdflab", "-q", "-v", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from(["pdflab", "-f", "--no-clobber", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from(["pdflab", "--json", "a.pdf"]).is_err());
    }

    #[test]
    fn test_json_dry_run() {
        let cli = parse(&["-n", "--json", "a.pdf"]);
        assert!(cli.validate().is_ok());
        assert!(cli.to_config().unwrap().dry_run);
    }

    #[test]
    fn test_output_equal_to_input_rejected() {
        let cli = parse(&["-o", "a.pdf", "a.pdf"]);
        assert!(matches!(cli.to_config(), Err(PdfLabError::InvalidConfig { .. })));
    }

    #[test]
    fn test_unmatched_glob_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let pattern = format!("{}/*.pdf", dir.path().display());
        let cli = parse(&[&pattern]);

        assert!(matches!(cli.to_config(), Err(PdfLabError::InvalidConfig { .. })));
    }

    #[test]
    fn test_glob_expansion() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["b.pdf", "a.pdf"] {
            std::fs::write(dir.path().join(name), b"%PDF").unwrap();
        }
        let pattern = format!("{}/*.pdf", dir.path().display());
        let output = dir.path().join("out.pdf");

        let cli = parse(&[&pattern, "-o", output.to_str().unwrap()]);
        let config = cli.to_config().unwrap();
        assert_eq!(
            config.inputs,
            vec![dir.path().join("a.pdf"), dir.path().join("b.pdf")]
        );
    }
}
