//! Resolution of an installed Python module to its source file.
//!
//! The interpreter that owns the installation is asked to import the module
//! and print `inspect.getfile()` for it, so the answer matches whatever
//! `sys.path` the deployment actually runs with.

use crate::config::PatchSettings;
use crate::error::{MaintError, Result};
use std::path::PathBuf;
use std::process::Command;

const RESOLVE_SNIPPET: &str = "import importlib, inspect, sys\n\
print(inspect.getfile(importlib.import_module(sys.argv[1])))";

/// Resolve the file to patch.
///
/// An explicit `target` wins over module resolution. Either way the path must
/// exist, otherwise the dependency is treated as absent.
pub fn locate_target(settings: &PatchSettings) -> Result<PathBuf> {
    let path = match &settings.target {
        Some(target) => target.clone(),
        None => resolve_module(&settings.python, &settings.module)?,
    };

    if !path.is_file() {
        return Err(MaintError::ModuleNotFound {
            module: settings.module.clone(),
            reason: format!("'{}' does not exist", path.display()),
        });
    }

    Ok(path)
}

/// Ask `python` where `module` lives.
pub fn resolve_module(python: &str, module: &str) -> Result<PathBuf> {
    tracing::debug!(python, module, "resolving module path");

    let output = Command::new(python)
        .args(["-c", RESOLVE_SNIPPET, module])
        .output()
        .map_err(|e| MaintError::ModuleNotFound {
            module: module.to_string(),
            reason: format!("failed to execute {}: {}", python, e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // The traceback's last line names the actual problem (ModuleNotFoundError: ...).
        let reason = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("import failed")
            .trim()
            .to_string();
        return Err(MaintError::ModuleNotFound {
            module: module.to_string(),
            reason,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout.trim();
    if path.is_empty() {
        return Err(MaintError::ModuleNotFound {
            module: module.to_string(),
            reason: format!("{} printed no path", python),
        });
    }

    Ok(PathBuf::from(path))
}
