//! Bootstrap sequencer.
//!
//! One path through the sequence: install dependencies once, then provision
//! each configured directory in order. Any failure aborts the run
//! immediately; there is no partial-success state to reconcile.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::GroundworkResult;
use crate::installer::install_dependencies;
use crate::provision::{ensure_directory, DirOutcome};
use crate::state::{manifest_digest, RuntimeState};

/// Options for a bootstrap run
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapOptions {
    /// Report what would be done without mutating anything
    pub dry_run: bool,
}

/// Result of a completed bootstrap sequence
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    /// Whether the installer was actually invoked (false on dry run)
    pub installed: bool,
    /// Directories created by this run
    pub created: Vec<PathBuf>,
    /// Directories that already existed
    pub existing: Vec<PathBuf>,
}

impl BootstrapReport {
    /// All directories guaranteed present after the run
    pub fn provisioned(&self) -> usize {
        self.created.len() + self.existing.len()
    }
}

/// Execute the full bootstrap sequence against `config`.
///
/// Aborts on the first failing step; the error carries which step failed.
/// On full success (not dry run) the runtime state record on the mount is
/// updated, best-effort.
pub fn run_bootstrap(config: &Config, options: &BootstrapOptions) -> GroundworkResult<BootstrapReport> {
    let mut report = BootstrapReport::default();

    install_dependencies(&config.installer, options.dry_run)?;
    report.installed = !options.dry_run;

    for dir in config.target_directories() {
        match ensure_directory(&dir, options.dry_run)? {
            DirOutcome::Created => report.created.push(dir),
            DirOutcome::Existing => report.existing.push(dir),
        }
    }

    if !options.dry_run {
        if let Ok(digest) = manifest_digest(&config.installer.manifest) {
            let mut state = RuntimeState::load(&config.disk.mount);
            let mut directories = report.created.clone();
            directories.extend(report.existing.iter().cloned());
            state.record_run(digest, directories, &config.disk.mount);
        }
    }

    Ok(report)
}
