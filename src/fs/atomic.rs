//! Atomic file replacement.
//!
//! All writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Copy the permissions of the file being replaced, if it exists
//! 3. Sync the file to disk (fsync)
//! 4. Rename the temporary file over the target
//!
//! Source and destination share a directory, so the rename stays on one
//! filesystem. On crash a `.{filename}.tmp` file may remain next to the target.

use crate::error::{MaintError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Read a whole file as UTF-8 text.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        MaintError::IoError(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// Atomically replace the contents of `path` with `content`.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    if let Ok(metadata) = fs::metadata(path) {
        // Site-packages files are often read-only for group/other; keep whatever mode they had.
        if let Err(e) = fs::set_permissions(&temp_path, metadata.permissions()) {
            let _ = fs::remove_file(&temp_path);
            return Err(MaintError::IoError(format!(
                "failed to copy permissions of '{}': {}",
                path.display(),
                e
            )));
        }
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        MaintError::IoError(format!("failed to replace '{}': {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "file replaced");
    Ok(())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            MaintError::IoError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        MaintError::IoError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        MaintError::IoError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        MaintError::IoError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tool_executor.py");
        fs::write(&file_path, "original content").unwrap();

        atomic_write_file(&file_path, "new content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("run.yaml");

        atomic_write_file(&file_path, "version: 2\n").unwrap();

        assert_eq!(read_file(&file_path).unwrap(), "version: 2\n");
    }

    #[test]
    fn test_atomic_write_temp_file_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("run.yaml");

        atomic_write_file(&file_path, "content").unwrap();

        assert!(!temp_dir.path().join(".run.yaml.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tool_executor.py");
        fs::write(&file_path, "x").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o640)).unwrap();

        atomic_write_file(&file_path, "y").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file(temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, MaintError::IoError(_)));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_generate_temp_path() {
        let temp = generate_temp_path(Path::new("/some/path/run.yaml")).unwrap();
        assert_eq!(temp, Path::new("/some/path/.run.yaml.tmp"));
    }
}
