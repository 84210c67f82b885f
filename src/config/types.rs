//! Constants, enums, and default value functions used by the settings structs.

/// Dotted module path of the Llama Stack tool executor.
pub const DEFAULT_TARGET_MODULE: &str =
    "llama_stack.providers.inline.agents.meta_reference.responses.tool_executor";

/// Interpreter that owns the Llama Stack installation.
pub const DEFAULT_PYTHON: &str = "python3";

/// Upstream source file holding the question-validity prompt templates.
pub const DEFAULT_UPSTREAM_URL: &str = "https://raw.githubusercontent.com/redhat-developer/rhdh-plugins/refs/heads/main/workspaces/lightspeed/plugins/lightspeed-backend/src/prompts/rhdh-profile.py";

/// Local Llama Stack configuration, relative to the scripts directory.
pub const DEFAULT_RUN_CONFIG: &str = "../../run.yaml";

/// `provider_id` of the safety provider that owns the prompt pair.
pub const QUESTION_VALIDITY_PROVIDER_ID: &str = "lightspeed_question_validity";

/// Action requested from `sync-prompts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Compare local prompts with upstream and report.
    Validate,
    /// Overwrite local prompts with upstream.
    Update,
}

impl SyncMode {
    /// Parse a sync mode from the `--type` value.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "validate" => Some(Self::Validate),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}
