//! Fetching the upstream prompt profile and pulling the templates out of it.

use super::prompt::PromptPair;
use crate::config::Upstream;
use crate::error::{MaintError, Result};
use crate::fs::read_file;
use regex::Regex;

/// Constant holding the question validator template.
pub const VALIDATOR_CONSTANT: &str = "QUESTION_VALIDATOR_PROMPT_TEMPLATE";

/// Constant holding the rejection reply.
pub const INVALID_RESPONSE_CONSTANT: &str = "INVALID_QUERY_RESP";

/// `NAME = """..."""` or `NAME = '''...'''`, optionally with an `f` prefix.
///
/// No backreferences in `regex`, so each quote flavour is its own alternative;
/// the leftmost match wins either way.
fn triple_quoted_assignment(name: &str, allow_f_string: bool) -> Result<Regex> {
    let prefix = if allow_f_string { "f?" } else { "" };
    let pattern = format!(
        r#"(?s){}\s*=\s*{}(?:"""(.*?)"""|'''(.*?)''')"#,
        regex::escape(name),
        prefix
    );
    Regex::new(&pattern).map_err(|e| {
        MaintError::PatternNotFound(format!("invalid pattern for {}: {}", name, e))
    })
}

fn capture(name: &str, allow_f_string: bool, body: &str) -> Result<String> {
    let re = triple_quoted_assignment(name, allow_f_string)?;
    let caps = re
        .captures(body)
        .ok_or_else(|| MaintError::TemplateNotFound(name.to_string()))?;
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default();
    Ok(value.to_string())
}

/// Extract the prompt pair from the upstream source text.
pub fn extract_prompts(body: &str) -> Result<PromptPair> {
    let validator_prompt = capture(VALIDATOR_CONSTANT, true, body)?;
    let invalid_response = capture(INVALID_RESPONSE_CONSTANT, false, body)?;

    Ok(PromptPair {
        validator_prompt,
        invalid_response,
    })
}

/// Read the upstream document.
pub fn fetch_document(upstream: &Upstream) -> Result<String> {
    match upstream {
        Upstream::Url(url) => {
            tracing::debug!(url = %url, "fetching upstream prompts");
            let response = reqwest::blocking::get(url)?.error_for_status()?;
            Ok(response.text()?)
        }
        Upstream::File(path) => read_file(path),
    }
}

/// Fetch the upstream document and extract its prompt pair.
pub fn fetch_remote(upstream: &Upstream) -> Result<PromptPair> {
    let body = fetch_document(upstream)?;
    tracing::debug!(bytes = body.len(), "upstream document loaded");
    extract_prompts(&body)
}
