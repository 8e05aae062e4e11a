//! Visual theme and styling.

use console::Style;

/// Colors and glyphs for terminal output.
#[derive(Debug, Clone)]
pub struct BootstrapTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Spinners and stage markers (cyan).
    pub info: Style,
    /// Secondary text.
    pub dim: Style,
    /// Emphasis.
    pub highlight: Style,
    /// Header glyph.
    pub header: Style,
    /// Hints (cyan dim).
    pub hint: Style,
}

impl Default for BootstrapTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapTheme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a stage line, e.g. `[2/4] Package manager`.
    pub fn format_stage(&self, current: usize, total: usize, name: &str) -> String {
        format!(
            "{} {}",
            self.dim.apply_to(format!("[{}/{}]", current, total)),
            self.highlight.apply_to(name)
        )
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▶"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_glyphs() {
        let theme = BootstrapTheme::plain();
        assert_eq!(theme.format_success("uv ready"), "✓ uv ready");
        assert_eq!(theme.format_warning("Skipped"), "⚠ Skipped");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.format_skipped("Declined"), "○ Declined");
    }

    #[test]
    fn stage_line_includes_counter() {
        let theme = BootstrapTheme::plain();
        assert_eq!(
            theme.format_stage(3, 4, "Dependencies"),
            "[3/4] Dependencies"
        );
    }

    #[test]
    fn header_includes_title() {
        let theme = BootstrapTheme::plain();
        assert!(theme.format_header("ytdl-bootstrap").contains("ytdl-bootstrap"));
    }

    #[test]
    fn colored_theme_keeps_text() {
        let theme = BootstrapTheme::new();
        assert!(theme.format_success("done").contains("done"));
    }
}
