//! Command implementations for stack-maint.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod patch_attributes;
mod sync_prompts;

use crate::cli::Command;
use crate::error::Result;

pub use patch_attributes::cmd_patch_attributes;
pub use sync_prompts::cmd_sync_prompts;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::PatchAttributes(args) => cmd_patch_attributes(args),
        Command::SyncPrompts(args) => cmd_sync_prompts(args),
    }
}
