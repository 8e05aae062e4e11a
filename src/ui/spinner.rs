//! Progress spinners.

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::BootstrapTheme;
use super::SpinnerHandle;

/// A spinner for long-running operations: installs, syncs, downloads.
pub struct ProgressSpinner {
    bar: ProgressBar,
    base_message: String,
    theme: BootstrapTheme,
}

impl ProgressSpinner {
    /// Create and start a spinner.
    pub fn new(message: &str, theme: BootstrapTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            base_message: message.to_string(),
            theme,
        }
    }

    /// A spinner that draws nothing (silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            base_message: String::new(),
            theme: BootstrapTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(line);
    }
}

/// Render a byte counter, e.g. `12.50 MiB / 80.00 MiB`.
pub fn format_transfer(done: u64, total: Option<u64>) -> String {
    match total {
        Some(total) if total > 0 => format!("{} / {}", HumanBytes(done), HumanBytes(total)),
        _ => format!("{}", HumanBytes(done)),
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.base_message = msg.to_string();
        self.bar.set_message(msg.to_string());
    }

    fn set_progress(&mut self, done: u64, total: Option<u64>) {
        self.bar.set_message(format!(
            "{} {}",
            self.base_message,
            self.theme.dim.apply_to(format_transfer(done, total))
        ));
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let line = self.theme.format_skipped(msg);
        self.finish_with(line);
    }
}
