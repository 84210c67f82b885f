//! Reading and writing the prompt pair in the local `run.yaml`.
//!
//! The pair lives in the safety provider whose `provider_id` matches, under
//! `config.model_prompt` and `config.invalid_question_response`.

use super::prompt::PromptPair;
use super::yaml_edit::{PathSegment, replace_scalar};
use crate::error::{MaintError, Result};
use crate::fs::{atomic_write_file, read_file};
use serde_yaml::Value;
use std::path::Path;

/// Field holding the validator prompt.
pub const MODEL_PROMPT_FIELD: &str = "model_prompt";

/// Field holding the rejection reply.
pub const INVALID_RESPONSE_FIELD: &str = "invalid_question_response";

/// Read the prompt pair from the file at `path`.
pub fn read_local(path: &Path, provider_id: &str) -> Result<PromptPair> {
    let text = read_file(path)?;
    read_prompts(&text, provider_id)
}

/// Read the prompt pair from `run.yaml` text.
pub fn read_prompts(text: &str, provider_id: &str) -> Result<PromptPair> {
    let doc: Value = serde_yaml::from_str(text)
        .map_err(|e| MaintError::ConfigError(format!("failed to parse run.yaml: {}", e)))?;
    let (_, provider) = find_provider(&doc, provider_id)?;

    let config = provider.get("config").ok_or_else(|| {
        MaintError::ConfigError(format!("provider '{}' has no config mapping", provider_id))
    })?;

    Ok(PromptPair {
        validator_prompt: string_field(config, MODEL_PROMPT_FIELD, provider_id)?,
        invalid_response: string_field(config, INVALID_RESPONSE_FIELD, provider_id)?,
    })
}

/// Overwrite the provider's two fields with the newline-trimmed `remote` values.
///
/// Everything else in the file is kept byte for byte. The new text is parsed
/// again before writing and must yield exactly the new values.
pub fn write_local(remote: &PromptPair, path: &Path, provider_id: &str) -> Result<()> {
    let text = read_file(path)?;
    let updated = update_prompts(&text, remote, provider_id)?;
    atomic_write_file(path, &updated)
}

/// Apply the update to `run.yaml` text and return the new text.
pub fn update_prompts(text: &str, remote: &PromptPair, provider_id: &str) -> Result<String> {
    let doc: Value = serde_yaml::from_str(text)
        .map_err(|e| MaintError::ConfigError(format!("failed to parse run.yaml: {}", e)))?;
    let (index, _) = find_provider(&doc, provider_id)?;
    let wanted = remote.trimmed();

    let updated = replace_scalar(
        text,
        &field_path(index, MODEL_PROMPT_FIELD),
        &wanted.validator_prompt,
    )?;
    let updated = replace_scalar(
        &updated,
        &field_path(index, INVALID_RESPONSE_FIELD),
        &wanted.invalid_response,
    )?;

    let written = read_prompts(&updated, provider_id)?;
    if written != wanted {
        return Err(MaintError::ConfigError(
            "edited run.yaml does not read back the new prompts; file left unchanged".to_string(),
        ));
    }

    Ok(updated)
}

fn field_path(index: usize, field: &str) -> [PathSegment<'_>; 5] {
    [
        PathSegment::Key("providers"),
        PathSegment::Key("safety"),
        PathSegment::Index(index),
        PathSegment::Key("config"),
        PathSegment::Key(field),
    ]
}

fn find_provider<'a>(doc: &'a Value, provider_id: &str) -> Result<(usize, &'a Value)> {
    let safety = doc
        .get("providers")
        .and_then(|providers| providers.get("safety"))
        .and_then(Value::as_sequence)
        .ok_or_else(|| {
            MaintError::ConfigError("run.yaml has no providers.safety list".to_string())
        })?;

    safety
        .iter()
        .enumerate()
        .find(|(_, provider)| {
            provider.get("provider_id").and_then(Value::as_str) == Some(provider_id)
        })
        .ok_or_else(|| {
            MaintError::ConfigError(format!(
                "safety provider '{}' not found in run.yaml",
                provider_id
            ))
        })
}

fn string_field(config: &Value, field: &str, provider_id: &str) -> Result<String> {
    config
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            MaintError::ConfigError(format!(
                "provider '{}' has no string field config.{}",
                provider_id, field
            ))
        })
}
