//! Shell command execution and process environment management.

pub mod command;
pub mod platform;

pub use command::{execute, probe_program, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated, path_entries, prepend_to_path, prepended_path};
