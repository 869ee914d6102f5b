//! pdflab - Merge PDF files into a single navigable document.

mod cli;

use clap::Parser;
use std::process;
use tokio::task;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdflab::config::{Config, OverwriteMode};
use pdflab::error::PdfLabError;
use pdflab::io::{PdfWriter, format_file_size, read_sources};
use pdflab::merge::MergeAssembler;
use pdflab::output::{
    OutputFormatter, ProgressBar, ProgressStyle, display_merge_statistics, display_plan,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Log level used when `RUST_LOG` is not set.
fn default_log_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfLabError> {
    cli.validate()?;
    let config = cli.to_config()?;
    tracing::debug!(
        inputs = config.inputs.len(),
        output = %config.output.display(),
        options = ?config.options,
        "Configuration resolved"
    );

    // JSON output must stay machine-readable.
    let formatter = if cli.json {
        OutputFormatter::quiet()
    } else {
        OutputFormatter::from_config(&config)
    };

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdflab::NAME, pdflab::VERSION));
        formatter.blank_line();
    }

    formatter.info(&format!("Reading {} file(s)...", config.inputs.len()));
    let sources = read_sources(&config.inputs).await?;

    if config.dry_run {
        let options = config.options;
        let plan = task::spawn_blocking(move || MergeAssembler::new().plan(&sources, &options))
            .await
            .map_err(|e| PdfLabError::other(format!("Planning task failed: {e}")))??;

        if cli.json {
            let json = serde_json::to_string_pretty(&plan)
                .map_err(|e| PdfLabError::serialization_failed(e.to_string()))?;
            println!("{json}");
            return Ok(());
        }

        display_plan(&formatter, &plan);
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    handle_output_overwrite(&config, &formatter).await?;

    let writer = PdfWriter::new();
    writer.can_write(&config.output).await?;

    formatter.info("Merging documents...");

    let progress = if formatter.should_print() {
        ProgressBar::new(ProgressStyle::Bar)
    } else {
        ProgressBar::disabled()
    };
    let options = config.options;

    let (result, mut progress) = task::spawn_blocking(move || {
        let mut progress = progress;
        let result = MergeAssembler::new().assemble(&sources, &options, &mut progress);
        (result, progress)
    })
    .await
    .map_err(|e| PdfLabError::other(format!("Merge task failed: {e}")))?;

    let result = match result {
        Ok(result) => {
            progress.finish();
            result
        }
        Err(err) => {
            progress.clear();
            return Err(err);
        }
    };

    if formatter.should_print() {
        formatter.blank_line();
        display_merge_statistics(&formatter, &result.statistics);
    }

    formatter.info(&format!("Writing to: {}", config.output.display()));
    let write_stats = writer.save_with_stats(&result.bytes, &config.output).await?;

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            config.output.display(),
            format_file_size(write_stats.file_size)
        ));
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfLabError> {
    if !PdfWriter::new().exists(&config.output).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfLabError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // Nobody to ask in quiet mode.
            if formatter.is_quiet() {
                return Err(PdfLabError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            let answer = task::spawn_blocking(|| {
                use std::io::{self, Write};

                print!("Overwrite? [y/N]: ");
                io::stdout().flush().ok();

                let mut response = String::new();
                io::stdin().read_line(&mut response).map(|_| response)
            })
            .await
            .map_err(|e| PdfLabError::other(format!("Prompt task failed: {e}")))?
            .map_err(|err| PdfLabError::other(format!("Failed to read input: {err}")))?;

            if confirms_overwrite(&answer) {
                Ok(())
            } else {
                Err(PdfLabError::Cancelled)
            }
        }
    }
}

fn confirms_overwrite(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
