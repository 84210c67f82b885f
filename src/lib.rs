//! stack-maint: maintenance utilities for a Llama Stack deployment.
//!
//! - [`patcher`] fixes how the installed tool executor builds file-search
//!   citations.
//! - [`prompt_sync`] keeps the question-validity prompts in `run.yaml` in
//!   line with the upstream RHDH lightspeed profile.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod patcher;
pub mod prompt_sync;

#[cfg(test)]
pub(crate) mod test_support;
