//! Shared fixtures for unit tests.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Excerpt of an unpatched Llama Stack 0.3.5 `tool_executor.py`.
pub(crate) const TOOL_EXECUTOR_SOURCE: &str = r#"class ToolExecutor:
    async def _execute_knowledge_search_via_vector_store(self, query, response_file_search_tool):
        search_results = await self._search(query, response_file_search_tool)
        content_items = []
        citation_files = {}
        for r in search_results:
            citation_files[r.file_id] = r.filename
        return ToolInvocationResult(
            content=content_items,
            metadata={
                "document_ids": [r.file_id for r in search_results],
                "chunks": [r.content[0].text if r.content else "" for r in search_results],
                "scores": [r.score for r in search_results],
                "citation_files": citation_files,
            },
        )

    async def _build_result_messages(self, function, tool_call_id, item_id, tool_kind, result):
        if function.name == "knowledge_search":
            if tool_kind == "file_search":
                message = OpenAIResponseOutputMessageFileSearchToolCall(id=item_id, queries=[], status="completed")
                if result and "document_ids" in result.metadata:
                    message.results = []
                    for i, doc_id in enumerate(result.metadata["document_ids"]):
                        text = result.metadata["chunks"][i] if "chunks" in result.metadata else None
                        score = result.metadata["scores"][i] if "scores" in result.metadata else None
                        message.results.append(
                            OpenAIResponseOutputMessageFileSearchToolCallResults(
                                file_id=doc_id,
                                filename=doc_id,
                                text=text,
                                score=score,
                                attributes={},
                            )
                        )
        return message
"#;

/// Minimal Llama Stack `run.yaml` with the question-validity provider.
pub(crate) const RUN_YAML: &str = r#"version: 2
image_name: rhdh-lightspeed
# Safety shields
providers:
  inference:
  - provider_id: openai
    provider_type: remote::openai
    config:
      api_key: ${env.OPENAI_API_KEY:=}
  safety:
  - provider_id: llama-guard
    provider_type: inline::llama-guard
    config:
      excluded_categories: []
  - provider_id: lightspeed_question_validity
    provider_type: inline::lightspeed_question_validity
    config:
      model_id: ${env.VALIDATION_MODEL:=gpt-4o-mini}
      model_prompt: |-
        Instructions:
        Reject anything about ${rejected}.
        Allow ${allowed}.
        Question: ${message}
      invalid_question_response: "I can only answer questions about Backstage."
shields:
- shield_id: lightspeed_question_validity-shield
  provider_id: lightspeed_question_validity
"#;

/// Upstream prompt source matching [`RUN_YAML`] after normalization.
pub(crate) const UPSTREAM_SOURCE: &str = r#"# Prompt profile for the RHDH lightspeed backend.
QUESTION_VALIDATOR_PROMPT_TEMPLATE = f"""
Instructions:
Reject anything about {SUBJECT_REJECTED}.
Allow {SUBJECT_ALLOWED}.
Question: {{query}}
"""

INVALID_QUERY_RESP = """
I can only answer questions about Backstage.
"""
"#;

/// Write `content` to `name` inside a fresh temporary directory.
pub(crate) fn write_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}
