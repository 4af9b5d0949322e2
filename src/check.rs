//! Preflight validation for the bootstrap environment.
//!
//! Checks the environment a `run` would need without mutating it:
//! - manifest file present
//! - installer resolvable
//! - mount present and writable
//! - target paths free of non-directory collisions
//! - manifest drift against the recorded runtime state
//!
//! The only write is a short-lived probe file used to test mount
//! writability.

use crate::config::Config;
use crate::installer::resolve_installer;
use crate::provision::conflicting_segment;
use crate::state::{manifest_digest, RuntimeState};

/// Preflight check result
#[derive(Debug, Clone, PartialEq)]
pub struct PreflightCheck {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub recommendation: Option<String>,
}

/// Status of a preflight check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "✓"),
            CheckStatus::Warning => write!(f, "⚠"),
            CheckStatus::Error => write!(f, "✗"),
        }
    }
}

/// Preflight validation results
#[derive(Debug, Clone, Default)]
pub struct PreflightReport {
    pub checks: Vec<PreflightCheck>,
}

impl PreflightReport {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn add_pass(&mut self, name: &str, message: &str) {
        self.checks.push(PreflightCheck {
            name: name.to_string(),
            status: CheckStatus::Pass,
            message: message.to_string(),
            recommendation: None,
        });
    }

    pub fn add_warning(&mut self, name: &str, message: &str, recommendation: Option<&str>) {
        self.checks.push(PreflightCheck {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            recommendation: recommendation.map(String::from),
        });
    }

    pub fn add_error(&mut self, name: &str, message: &str, recommendation: Option<&str>) {
        self.checks.push(PreflightCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            recommendation: recommendation.map(String::from),
        });
    }

    pub fn passes(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Warning)
            .count()
    }

    pub fn errors(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Error)
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.errors() == 0
    }
}

/// Run all preflight checks against `config`
pub fn run_preflight(config: &Config) -> PreflightReport {
    let mut report = PreflightReport::new();

    check_manifest(config, &mut report);
    check_installer(config, &mut report);
    check_mount(config, &mut report);
    check_directories(config, &mut report);
    check_state(config, &mut report);

    report
}

fn check_manifest(config: &Config, report: &mut PreflightReport) {
    let manifest = &config.installer.manifest;
    if manifest.is_file() {
        report.add_pass("manifest", &format!("{} present", manifest.display()));
    } else {
        report.add_error(
            "manifest",
            &format!("{} not found", manifest.display()),
            Some("create the manifest or point [installer] manifest at the right file"),
        );
    }
}

fn check_installer(config: &Config, report: &mut PreflightReport) {
    let command = &config.installer.command;
    match resolve_installer(command) {
        Some(path) => {
            report.add_pass("installer", &format!("'{}' resolves to {}", command, path.display()));
        }
        None => {
            report.add_warning(
                "installer",
                &format!("'{}' not found on PATH", command),
                Some("install the package manager or set [installer] command"),
            );
        }
    }
}

fn check_mount(config: &Config, report: &mut PreflightReport) {
    let mount = &config.disk.mount;
    match std::fs::metadata(mount) {
        Ok(meta) if meta.is_dir() => {
            let probe = tempfile::Builder::new()
                .prefix(".groundwork-probe")
                .tempfile_in(mount);
            match probe {
                Ok(_probe) => {
                    report.add_pass("mount", &format!("{} is writable", mount.display()));
                }
                Err(e) => {
                    report.add_error(
                        "mount",
                        &format!("{} is not writable: {}", mount.display(), e),
                        Some("check the volume mount and its permissions"),
                    );
                }
            }
        }
        Ok(_) => {
            report.add_error(
                "mount",
                &format!("{} exists but is not a directory", mount.display()),
                Some("remove the conflicting entry or change [disk] mount"),
            );
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            report.add_warning(
                "mount",
                &format!("{} does not exist (volume may not be attached)", mount.display()),
                Some("the bootstrap run creates it if the parent is writable"),
            );
        }
        Err(e) => {
            report.add_error(
                "mount",
                &format!("cannot inspect {}: {}", mount.display(), e),
                None,
            );
        }
    }
}

fn check_directories(config: &Config, report: &mut PreflightReport) {
    for dir in config.target_directories() {
        if let Some(conflict) = conflicting_segment(&dir) {
            report.add_error(
                "directories",
                &format!(
                    "{} collides with non-directory {}",
                    dir.display(),
                    conflict.display()
                ),
                Some("remove the conflicting file"),
            );
        } else if dir.is_dir() {
            report.add_pass("directories", &format!("{} already provisioned", dir.display()));
        } else {
            report.add_pass("directories", &format!("{} will be created", dir.display()));
        }
    }
}

fn check_state(config: &Config, report: &mut PreflightReport) {
    let state = RuntimeState::load(&config.disk.mount);
    let Some(last) = state.last_run else {
        report.add_pass("state", "no previous bootstrap recorded");
        return;
    };

    match manifest_digest(&config.installer.manifest) {
        Ok(digest) if digest == last.manifest_digest => {
            report.add_pass(
                "state",
                &format!("dependencies unchanged since last bootstrap ({})", last.completed_at),
            );
        }
        Ok(_) => {
            report.add_warning(
                "state",
                "dependency manifest changed since last bootstrap",
                Some("run `groundwork run` to reinstall"),
            );
        }
        // Missing manifest is already an error from check_manifest.
        Err(_) => {}
    }
}
