//! Source patch for the Llama Stack tool executor.
//!
//! Llama Stack 0.3.5 builds file-search citation results with
//! `filename=doc_id` and `attributes={}` even though the vector store
//! returns real attributes for every hit. The patch:
//!
//! 1. Adds `search_result_attributes` to the metadata returned by the
//!    knowledge search.
//! 2. Rewrites the results loop to read that list, alias `docs_url` to
//!    `doc_url`, and use the `title` attribute as the display filename.
//!
//! Application is idempotent: each step is skipped when its marker token is
//! already in the file. A missing results block is fatal and leaves the file
//! untouched.

mod blocks;
mod locate;


pub use blocks::{METADATA_MARKER, RESULTS_MARKER};
pub use locate::{locate_target, resolve_module};

use crate::error::Result;
use crate::fs::{atomic_write_file, read_file};
use blocks::{METADATA_BLOCK, METADATA_BLOCK_PATCHED, RESULTS_BLOCK, RESULTS_BLOCK_PATCHED};
use std::path::Path;

/// Result of one replacement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Marker already present; nothing to do.
    AlreadyPresent,
    /// Block replaced this many times.
    Replaced(usize),
    /// Marker absent and the block to replace is not in the source.
    BlockNotFound,
}

/// Overall result of [`apply_patch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// File already carried both patches; not rewritten.
    AlreadyPatched,
    /// File was rewritten.
    Applied,
    /// The results block has drifted upstream; file not rewritten.
    BlockNotFound,
}

/// In-memory result of patching a source text.
#[derive(Debug, Clone)]
pub struct SourcePatch {
    /// Patched text (equal to the input when nothing applied).
    pub source: String,
    /// Outcome of the metadata step.
    pub metadata: StepOutcome,
    /// Outcome of the results-loop step.
    pub results: StepOutcome,
}

/// Apply both replacement steps to `source`.
pub fn patch_source(source: &str) -> SourcePatch {
    let (source, metadata) =
        replace_step(source, METADATA_MARKER, METADATA_BLOCK, METADATA_BLOCK_PATCHED);
    let (source, results) =
        replace_step(&source, RESULTS_MARKER, RESULTS_BLOCK, RESULTS_BLOCK_PATCHED);

    SourcePatch {
        source,
        metadata,
        results,
    }
}

fn replace_step(source: &str, marker: &str, block: &str, patched: &str) -> (String, StepOutcome) {
    if source.contains(marker) {
        return (source.to_string(), StepOutcome::AlreadyPresent);
    }

    let count = source.matches(block).count();
    if count == 0 {
        return (source.to_string(), StepOutcome::BlockNotFound);
    }

    (source.replace(block, patched), StepOutcome::Replaced(count))
}

/// Patch the file at `path` in place.
///
/// Prints one `[patch]` line per step. The file is written only when the
/// results step did not fail and the content actually changed.
pub fn apply_patch(path: &Path) -> Result<PatchOutcome> {
    let original = read_file(path)?;
    let patch = patch_source(&original);

    match patch.metadata {
        StepOutcome::AlreadyPresent => {
            println!("[patch] search_result_attributes already present - skipping patch 1")
        }
        StepOutcome::Replaced(_) => {
            println!("[patch] Injected search_result_attributes into metadata dict")
        }
        StepOutcome::BlockNotFound => {
            tracing::warn!(path = %path.display(), "metadata block not found");
            println!("[patch] WARNING: Could not find the metadata block - skipping patch 1")
        }
    }

    match patch.results {
        StepOutcome::AlreadyPresent => {
            println!("[patch] sr_citation_files already present - skipping patch 2")
        }
        StepOutcome::Replaced(count) => {
            tracing::debug!(count, "results block replaced");
            println!("[patch] Replaced results-building block with normalised version")
        }
        StepOutcome::BlockNotFound => {
            println!("[patch] WARNING: Could not find the results-building block to replace");
            println!("[patch] The tool_executor.py may have been modified. Manual patching required.");
            return Ok(PatchOutcome::BlockNotFound);
        }
    }

    if patch.source == original {
        println!("[patch] No changes were needed - file already patched");
        return Ok(PatchOutcome::AlreadyPatched);
    }

    atomic_write_file(path, &patch.source)?;
    println!("[patch] Successfully patched {}", path.display());

    Ok(PatchOutcome::Applied)
}
