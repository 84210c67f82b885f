//! Human-readable diff between local and upstream prompts.

use super::prompt::{PromptPair, trim_newlines};
use similar::TextDiff;

const FROM_LABEL: &str = "run.yaml";
const TO_LABEL: &str = "upstream";

/// Unified diff for each field that differs, local as "from", upstream as "to".
///
/// Returns an empty string when the pair matches.
pub fn render_diff(remote: &PromptPair, local: &PromptPair) -> String {
    let fields = [
        (
            "Validation Prompt",
            &local.validator_prompt,
            &remote.validator_prompt,
        ),
        (
            "Invalid Response Prompt",
            &local.invalid_response,
            &remote.invalid_response,
        ),
    ];

    let mut out = String::new();
    for (title, from, to) in fields {
        let from = trim_newlines(from);
        let to = trim_newlines(to);
        if from == to {
            continue;
        }
        out.push_str(title);
        out.push_str("\n-----\n");
        out.push_str(&unified_diff(from, to));
    }
    out
}

fn unified_diff(from: &str, to: &str) -> String {
    // Both sides end in a newline so the diff carries no end-of-file markers.
    let from = format!("{}\n", from);
    let to = format!("{}\n", to);
    TextDiff::from_lines(&from, &to)
        .unified_diff()
        .context_radius(3)
        .header(FROM_LABEL, TO_LABEL)
        .to_string()
}
