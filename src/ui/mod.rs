//! User-facing output and prompts.
//!
//! - [`UserInterface`] abstracts everything the bootstrap shows or asks
//! - [`TerminalUI`] drives an interactive terminal
//! - [`NonInteractiveUI`] serves CI and piped runs, answering prompts from
//!   `YTDL_BOOTSTRAP_PROMPT_<KEY>` or their defaults
//! - [`MockUI`] records interactions for tests
//!
//! # Example
//!
//! ```
//! use ytdl_bootstrap::ui::{create_ui, OutputMode, Prompt};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("ytdl-bootstrap");
//! let install = ui.confirm(&Prompt::new("demo", "Continue?", false)).unwrap();
//! assert!(!install);
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::confirm_on;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BootstrapTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Announce a stage ("[2/4] Package manager").
    fn show_stage(&mut self, current: usize, total: usize, name: &str);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Report transfer progress in bytes.
    fn set_progress(&mut self, done: u64, total: Option<u64>);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Stable key, used for env overrides and test responses.
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer when the user just presses enter.
    pub default: bool,
}

impl Prompt {
    pub fn new(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            default,
        }
    }

    /// Environment variable that answers this prompt in non-interactive runs.
    pub fn env_key(&self) -> String {
        format!(
            "{}{}",
            crate::config::defaults::PROMPT_ENV_PREFIX,
            self.key.to_uppercase()
        )
    }
}

/// Whether a typed answer counts as yes.
///
/// Only explicit affirmatives qualify; anything else, including an empty
/// string, is a no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "true" | "1"
    )
}
