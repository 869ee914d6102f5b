//! Progress reporting.
//!
//! A merge job reports its progress through a [`ProgressSink`]: a fraction
//! in `[0, 1]` that never decreases, plus a short status message. The core
//! knows nothing about how progress is displayed; closures, the terminal
//! [`ProgressBar`] and the [`ProgressRecorder`] used in tests all implement
//! the trait.
//!
//! # Examples
//!
//! ```
//! use pdflab::output::progress::{ProgressBar, ProgressSink, ProgressStyle};
//!
//! let mut progress = ProgressBar::new(ProgressStyle::Bar);
//! progress.on_progress(0.5, "Processing: a.pdf");
//! progress.on_progress(1.0, "Done");
//! progress.finish();
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Observer of merge progress.
pub trait ProgressSink {
    /// Called with the completed fraction of the job and a status message.
    fn on_progress(&mut self, fraction: f64, message: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64, &str),
{
    fn on_progress(&mut self, fraction: f64, message: &str) {
        self(fraction, message)
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _fraction: f64, _message: &str) {}
}

/// Sink that keeps every report, in order.
#[derive(Debug, Clone, Default)]
pub struct ProgressRecorder {
    /// Recorded `(fraction, message)` pairs.
    pub events: Vec<(f64, String)>,
}

impl ProgressRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded fractions, in order.
    pub fn fractions(&self) -> Vec<f64> {
        self.events.iter().map(|(f, _)| *f).collect()
    }

    /// Recorded messages, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|(_, m)| m.as_str()).collect()
    }
}

impl ProgressSink for ProgressRecorder {
    fn on_progress(&mut self, fraction: f64, message: &str) {
        self.events.push((fraction, message.to_string()));
    }
}

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Classic progress bar: [=====>    ]
    Bar,
    /// Percentage only: 42%
    Percent,
}

/// Terminal progress bar.
pub struct ProgressBar {
    /// Completed fraction of the job.
    fraction: f64,
    /// Progress bar style.
    style: ProgressStyle,
    /// Latest status message.
    message: Option<String>,
    /// Start time of the operation.
    start_time: Instant,
    /// Last redraw time (for rate limiting).
    last_update: Instant,
    /// Minimum time between redraws.
    update_interval: Duration,
    /// Whether the progress bar draws anything.
    enabled: bool,
}

impl ProgressBar {
    /// Create a new progress bar, enabled when stdout is a terminal.
    pub fn new(style: ProgressStyle) -> Self {
        Self {
            fraction: 0.0,
            style,
            message: None,
            start_time: Instant::now(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
            enabled: Self::is_terminal(),
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new(ProgressStyle::Percent);
        pb.enabled = false;
        pb
    }

    fn is_terminal() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal()
    }

    /// Set the message to display with the progress bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Update the completed fraction, clamped to `[0, 1]`.
    pub fn update(&mut self, fraction: f64) {
        self.fraction = fraction.clamp(0.0, 1.0);

        if self.last_update.elapsed() < self.update_interval && self.fraction < 1.0 {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Mark the progress bar as finished.
    pub fn finish(&mut self) {
        if self.enabled {
            self.fraction = 1.0;
            self.render();
            println!();
        }
    }

    /// Clear the progress bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    /// Current progress as a percentage.
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }

    /// Elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn render(&self) {
        if !self.enabled {
            return;
        }

        let output = match self.style {
            ProgressStyle::Bar => self.render_bar(),
            ProgressStyle::Percent => self.render_percent(),
        };

        print!("\r\x1b[K{output}");
        io::stdout().flush().ok();
    }

    fn render_bar(&self) -> String {
        let width = 40;
        let filled = (self.fraction * width as f64).round() as usize;
        let empty = width - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let mut parts = vec![
            bar,
            format!("{:.0}%", self.percent()),
            format_duration(self.elapsed()),
        ];

        if let Some(ref msg) = self.message {
            parts.push(msg.clone());
        }

        parts.join(" ")
    }

    fn render_percent(&self) -> String {
        let mut parts = vec![format!("{:.0}%", self.percent())];

        if let Some(ref msg) = self.message {
            parts.push(msg.clone());
        }

        parts.join(" ")
    }
}

impl ProgressSink for ProgressBar {
    fn on_progress(&mut self, fraction: f64, message: &str) {
        self.set_message(message);
        self.update(fraction);
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
