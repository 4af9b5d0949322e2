//! Persistent-disk directory provisioning.
//!
//! Directories are created with full ancestor creation and pre-existing
//! directories are tolerated. A path segment that exists as anything other
//! than a directory is a hard error naming the offending segment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GroundworkError, GroundworkResult};

/// Outcome of provisioning a single directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOutcome {
    /// Directory (and any missing ancestors) was created
    Created,
    /// Directory already existed; left untouched
    Existing,
}

/// Ensure `path` exists as a directory, creating missing ancestors.
///
/// Returns `Existing` when the directory is already there. With `dry_run`
/// the collision scan still runs but nothing is created.
pub fn ensure_directory(path: &Path, dry_run: bool) -> GroundworkResult<DirOutcome> {
    if let Some(conflict) = conflicting_segment(path) {
        return Err(GroundworkError::PathConflict { path: conflict });
    }

    if path.is_dir() {
        return Ok(DirOutcome::Existing);
    }

    if dry_run {
        return Ok(DirOutcome::Created);
    }

    fs::create_dir_all(path).map_err(|source| GroundworkError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(DirOutcome::Created)
}

/// Find the first segment of `path` that exists but is not a directory.
///
/// Walks from the root down; once a segment is missing, nothing deeper can
/// exist and the scan stops. Unreadable segments are left for
/// `create_dir_all` to report.
pub fn conflicting_segment(path: &Path) -> Option<PathBuf> {
    let mut ancestors: Vec<&Path> = path
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    ancestors.reverse();

    for ancestor in ancestors {
        match fs::metadata(ancestor) {
            Ok(meta) if meta.is_dir() => continue,
            Ok(_) => return Some(ancestor.to_path_buf()),
            Err(_) => return None,
        }
    }
    None
}
