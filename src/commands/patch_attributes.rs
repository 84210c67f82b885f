//! Implementation of the `stack-maint patch-attributes` command.

use crate::cli::PatchArgs;
use crate::config::PatchSettings;
use crate::error::{MaintError, Result};
use crate::patcher::{PatchOutcome, apply_patch, locate_target};

/// Build settings from defaults and CLI overrides.
pub fn settings_from_args(args: PatchArgs) -> PatchSettings {
    let defaults = PatchSettings::default();
    PatchSettings {
        python: args.python.unwrap_or(defaults.python),
        module: args.module.unwrap_or(defaults.module),
        target: args.target,
    }
}

/// Execute the `patch-attributes` command.
///
/// Succeeds when the file ends up patched, whether by this run or an earlier
/// one. A drifted results block is an error.
pub fn cmd_patch_attributes(args: PatchArgs) -> Result<()> {
    let settings = settings_from_args(args);

    let path = locate_target(&settings)?;
    println!("[patch] Found tool_executor.py at: {}", path.display());

    match apply_patch(&path)? {
        PatchOutcome::Applied | PatchOutcome::AlreadyPatched => Ok(()),
        PatchOutcome::BlockNotFound => Err(MaintError::PatternNotFound(format!(
            "results-building block not found in '{}'; manual patching required",
            path.display()
        ))),
    }
}
