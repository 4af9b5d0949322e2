//! Dependency installation via the platform's package manager.
//!
//! Groundwork does no dependency resolution of its own: the configured
//! package manager is invoked with the manifest file and its exit status is
//! authoritative. Installer stdout/stderr are inherited so the output lands
//! in the deployment log.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::InstallerConfig;
use crate::error::{GroundworkError, GroundworkResult};

/// Install the dependencies declared in the configured manifest.
///
/// Checks that the manifest file exists, then runs
/// `<command> <args...> <manifest>`. With `dry_run` the manifest check still
/// runs but the installer is not launched.
pub fn install_dependencies(installer: &InstallerConfig, dry_run: bool) -> GroundworkResult<()> {
    if !installer.manifest.is_file() {
        return Err(GroundworkError::ManifestNotFound {
            path: installer.manifest.clone(),
        });
    }

    if dry_run {
        return Ok(());
    }

    let status = Command::new(&installer.command)
        .args(&installer.args)
        .arg(&installer.manifest)
        .status()
        .map_err(|source| GroundworkError::InstallerSpawn {
            command: installer.command.clone(),
            source,
        })?;

    if !status.success() {
        return Err(GroundworkError::InstallerFailed {
            command: installer.command.clone(),
            code: status.code(),
        });
    }

    Ok(())
}

/// Render the full installer command line (for verbose output and reports).
pub fn command_line(installer: &InstallerConfig) -> String {
    let mut parts = vec![installer.command.clone()];
    parts.extend(installer.args.iter().cloned());
    parts.push(installer.manifest.display().to_string());
    parts.join(" ")
}

/// Resolve the installer command to an executable path.
///
/// A command containing a path separator is checked directly; a bare name
/// is searched on `PATH`. Returns `None` when nothing resolves.
pub fn resolve_installer(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let full = dir.join(command);
        if full.is_file() {
            return Some(full);
        }
    }
    None
}
