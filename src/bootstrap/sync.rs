//! Stage 3: `uv sync` against the project manifest.

use super::{failure_detail, StageContext, StageFlow, StageStatus};
use crate::error::{BootstrapError, Result};
use crate::ui::UserInterface;

const SYNC_COMMAND: &str = "uv sync";

/// Resolve and install the project's declared dependencies.
pub fn sync_dependencies(ctx: &StageContext<'_>, ui: &mut dyn UserInterface) -> Result<StageFlow> {
    let manifest = ctx.config.manifest_path();
    if !manifest.is_file() {
        return Err(BootstrapError::DependencySyncFailure {
            message: format!("no manifest found at {}", manifest.display()),
        });
    }

    tracing::info!("Syncing dependencies in {}", ctx.config.project_dir.display());
    let mut spinner = ui.start_spinner("Syncing project dependencies");
    let result = ctx
        .host
        .run(SYNC_COMMAND, Some(&ctx.config.project_dir))
        .map_err(|e| BootstrapError::DependencySyncFailure {
            message: e.to_string(),
        });
    let result = match result {
        Ok(result) => result,
        Err(e) => {
            spinner.finish_error("Could not start uv");
            return Err(e);
        }
    };

    if !result.success {
        spinner.finish_error("Dependency sync failed");
        return Err(BootstrapError::DependencySyncFailure {
            message: failure_detail(SYNC_COMMAND, &result),
        });
    }

    spinner.finish_success("Dependencies synced");
    Ok(StageFlow::Continue(StageStatus::Synced))
}
