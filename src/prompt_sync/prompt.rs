//! The prompt pair and the rules for comparing it across sources.

/// Placeholder tokens in the upstream template and their local equivalents.
///
/// Applied in order; upstream uses Python format fields, the safety shield
/// uses `${...}` substitutions.
pub const PLACEHOLDER_MAP: &[(&str, &str)] = &[
    ("{SUBJECT_REJECTED}", "${rejected}"),
    ("{SUBJECT_ALLOWED}", "${allowed}"),
    ("{{query}}", "${message}"),
];

/// The two question-validity templates kept in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    /// Prompt asking the model whether a question is in scope.
    pub validator_prompt: String,
    /// Reply sent when a question is rejected.
    pub invalid_response: String,
}

impl PromptPair {
    /// Translate upstream placeholders in the validator prompt.
    ///
    /// The invalid response is left verbatim.
    pub fn normalized_for_local(mut self) -> Self {
        self.validator_prompt = normalize_for_local(&self.validator_prompt);
        self
    }

    /// Both fields with leading/trailing newlines removed.
    pub fn trimmed(&self) -> Self {
        Self {
            validator_prompt: trim_newlines(&self.validator_prompt).to_string(),
            invalid_response: trim_newlines(&self.invalid_response).to_string(),
        }
    }
}

/// Replace upstream placeholder tokens with local ones; other text is untouched.
pub fn normalize_for_local(prompt: &str) -> String {
    PLACEHOLDER_MAP
        .iter()
        .fold(prompt.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Strip `\n` from both ends. Spaces, tabs, and `\r` are kept.
pub fn trim_newlines(value: &str) -> &str {
    value.trim_matches('\n')
}

/// True when both fields match after newline trimming.
pub fn compare(remote: &PromptPair, local: &PromptPair) -> bool {
    trim_newlines(&remote.validator_prompt) == trim_newlines(&local.validator_prompt)
        && trim_newlines(&remote.invalid_response) == trim_newlines(&local.invalid_response)
}
