//! Settings structs and their defaults.

use super::types::*;
use std::path::PathBuf;

/// Where the upstream prompt source is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upstream {
    /// Fetch over HTTP(S).
    Url(String),
    /// Read a local copy of the source file.
    File(PathBuf),
}

impl Upstream {
    /// Human-readable location, used in log lines.
    pub fn describe(&self) -> String {
        match self {
            Upstream::Url(url) => url.clone(),
            Upstream::File(path) => path.display().to_string(),
        }
    }
}

/// Settings for `patch-attributes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSettings {
    /// Interpreter asked to resolve the module path.
    pub python: String,
    /// Dotted module name to resolve.
    pub module: String,
    /// Explicit file to patch; skips module resolution when set.
    pub target: Option<PathBuf>,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            module: DEFAULT_TARGET_MODULE.to_string(),
            target: None,
        }
    }
}

/// Settings for `sync-prompts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Source of the upstream prompt templates.
    pub upstream: Upstream,
    /// Path to the local run.yaml.
    pub run_config: PathBuf,
    /// `provider_id` of the record that owns the prompts.
    pub provider_id: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            upstream: Upstream::Url(DEFAULT_UPSTREAM_URL.to_string()),
            run_config: PathBuf::from(DEFAULT_RUN_CONFIG),
            provider_id: QUESTION_VALIDITY_PROVIDER_ID.to_string(),
        }
    }
}
