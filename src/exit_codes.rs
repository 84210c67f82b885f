//! Exit code constants for the stack-maint CLI.
//!
//! - 0: Success (including "already patched" and "in sync")
//! - 1: Failure (missing dependency, drifted pattern, network, I/O)
//! - 1: Validation found local prompts out of sync with upstream

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any fatal failure.
pub const FAILURE: i32 = 1;

/// `sync-prompts --type validate` found a mismatch.
pub const OUT_OF_SYNC: i32 = 1;
