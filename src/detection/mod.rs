//! Platform, tool, and package manager detection.

pub mod candidate;
pub mod package_manager;
pub mod platform;
pub mod tool;

pub use candidate::{first_available, Candidate};
pub use package_manager::{Package, SystemPackageManager};
pub use platform::PlatformKind;
pub use tool::{detect_tool, detect_tool_where, extract_version, ToolAvailability, VersionQuery};
