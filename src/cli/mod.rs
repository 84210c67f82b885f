//! CLI argument parsing for stack-maint.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Maintenance utilities for a Llama Stack deployment.
///
/// - `patch-attributes` fixes citation attributes in the installed tool executor
/// - `sync-prompts` keeps the question-validity prompts in run.yaml in line with upstream
#[derive(Parser, Debug)]
#[command(name = "stack-maint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for stack-maint.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Patch the installed tool executor to pass search-result attributes through.
    ///
    /// Idempotent: a file that already carries the patch is left untouched.
    /// Fails if the code block to replace cannot be found.
    PatchAttributes(PatchArgs),

    /// Validate or update the question-validity prompts in run.yaml.
    ///
    /// Fetches the upstream prompt templates and compares them with
    /// (or writes them into) the local configuration.
    SyncPrompts(SyncArgs),
}

/// Arguments for the `patch-attributes` command.
#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// Python interpreter used to locate the installed module.
    #[arg(long)]
    pub python: Option<String>,

    /// Dotted name of the module to patch.
    #[arg(long)]
    pub module: Option<String>,

    /// Patch this file directly instead of locating the module.
    #[arg(long)]
    pub target: Option<PathBuf>,
}

/// Arguments for the `sync-prompts` command.
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Type of action: 'validate' or 'update'.
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// Upstream URL of the prompt source file.
    #[arg(long)]
    pub url: Option<String>,

    /// Read the upstream source from a local file instead of the network.
    #[arg(long, conflicts_with = "url")]
    pub upstream_file: Option<PathBuf>,

    /// Path to the local run.yaml.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Command {
    /// Prefix for fatal errors printed on behalf of this command.
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Command::PatchAttributes(_) => "[patch] ERROR:",
            Command::SyncPrompts(_) => "Error:",
        }
    }
}
