//! Starting the application once the machine is ready.

use crate::config::defaults::APP_ENTRY;
use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::host::Host;

/// Run the application through `uv` with the terminal attached.
///
/// The project's bin directory goes first on PATH so the application finds
/// a locally installed FFmpeg. Returns the application's exit code; a
/// process killed by a signal counts as 1.
pub fn launch_app(host: &dyn Host, config: &BootstrapConfig) -> Result<i32> {
    if config.bin_dir.is_dir() {
        host.prepend_path(&config.bin_dir);
    }

    let command = format!("uv run python {}", APP_ENTRY);
    tracing::info!("Launching: {}", command);
    let result = host.run_attached(&command, Some(&config.project_dir))?;
    Ok(result.exit_code.unwrap_or(1))
}
