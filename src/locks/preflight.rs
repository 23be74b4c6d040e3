//! Usability check for a lock path, run before any acquisition attempt.

use crate::error::{LockrunError, Result};
use std::path::Path;

/// Verify that `path` can be used as a lock file.
///
/// Fails if the path is an existing directory, or if a temporary file cannot
/// be created (and removed) next to it. The lock file itself is not created.
pub fn preflight(path: &Path) -> Result<()> {
    let unusable = |reason: String| LockrunError::PathUnusable {
        path: path.to_path_buf(),
        reason,
    };

    if path.is_dir() {
        return Err(unusable("it is a directory".to_string()));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();

    let probe = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(dir)
        .map_err(|e| unusable(e.to_string()))?;

    probe.close().map_err(|e| unusable(e.to_string()))?;

    Ok(())
}
