//! Synchronization of the question-validity prompts with upstream.
//!
//! The RHDH lightspeed backend publishes the validator prompt and the
//! rejection reply as Python constants. This module fetches them, translates
//! the placeholders into the safety shield's syntax, and either checks the
//! local `run.yaml` against them or writes them into it.

mod local;
mod prompt;
mod remote;
mod report;
pub mod yaml_edit;

#[cfg(test)]
mod tests;

pub use local::{read_local, read_prompts, update_prompts, write_local};
pub use prompt::{PLACEHOLDER_MAP, PromptPair, compare, normalize_for_local, trim_newlines};
pub use remote::{
    INVALID_RESPONSE_CONSTANT, VALIDATOR_CONSTANT, extract_prompts, fetch_document, fetch_remote,
};
pub use report::render_diff;

use crate::config::{SyncMode, SyncSettings};
use crate::error::Result;

/// What a sync run found or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local prompts match upstream.
    Valid,
    /// Local prompts differ; `diff` shows how.
    Invalid { diff: String },
    /// Local prompts were overwritten with upstream.
    Updated,
}

/// Upstream prompt pair with placeholders already translated.
pub fn fetch_normalized(settings: &SyncSettings) -> Result<PromptPair> {
    tracing::info!(upstream = %settings.upstream.describe(), "loading upstream prompts");
    Ok(fetch_remote(&settings.upstream)?.normalized_for_local())
}

/// Compare the local prompts with upstream.
pub fn validate(settings: &SyncSettings) -> Result<SyncOutcome> {
    let remote = fetch_normalized(settings)?;
    let local = read_local(&settings.run_config, &settings.provider_id)?;

    if compare(&remote, &local) {
        Ok(SyncOutcome::Valid)
    } else {
        Ok(SyncOutcome::Invalid {
            diff: render_diff(&remote, &local),
        })
    }
}

/// Overwrite the local prompts with upstream.
pub fn update(settings: &SyncSettings) -> Result<SyncOutcome> {
    let remote = fetch_normalized(settings)?;
    write_local(&remote, &settings.run_config, &settings.provider_id)?;
    tracing::info!(path = %settings.run_config.display(), "prompts written");
    Ok(SyncOutcome::Updated)
}

/// Run the requested mode.
pub fn run(mode: SyncMode, settings: &SyncSettings) -> Result<SyncOutcome> {
    match mode {
        SyncMode::Validate => validate(settings),
        SyncMode::Update => update(settings),
    }
}
