//! Configuration module for Groundwork
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GROUNDWORK_*)
//! 3. Project config (./groundwork.toml)
//! 4. User config (<config-dir>/groundwork/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Defaults reproduce the deployment this tool was written for: a pip
//! manifest and two application directories on a platform-mounted
//! persistent disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GroundworkResult;

/// Package-manager invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Package-manager executable (name resolved on PATH, or a path)
    #[serde(default = "default_installer_command")]
    pub command: String,

    /// Arguments placed before the manifest path
    #[serde(default = "default_installer_args")]
    pub args: Vec<String>,

    /// Dependency manifest handed to the package manager
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            command: default_installer_command(),
            args: default_installer_args(),
            manifest: default_manifest(),
        }
    }
}

fn default_installer_command() -> String {
    "pip".to_string()
}

fn default_installer_args() -> Vec<String> {
    vec!["install".to_string(), "-r".to_string()]
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

/// Persistent-disk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskConfig {
    /// Mount point of the persistent volume
    #[serde(default = "default_mount")]
    pub mount: PathBuf,

    /// Directories to provision; relative entries are joined onto `mount`
    #[serde(default = "default_directories")]
    pub directories: Vec<PathBuf>,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            mount: default_mount(),
            directories: default_directories(),
        }
    }
}

fn default_mount() -> PathBuf {
    PathBuf::from("/var/data")
}

fn default_directories() -> Vec<PathBuf> {
    vec![PathBuf::from("uploads"), PathBuf::from("quotes")]
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub installer: InstallerConfig,

    #[serde(default)]
    pub disk: DiskConfig,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG: &str = "groundwork.toml";

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GroundworkResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GroundworkResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| crate::error::GroundworkError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .last()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        // Try project config first
        if let Some(root) = project_root {
            let project_config = root.join(PROJECT_CONFIG);
            if project_config.exists() {
                if let Ok(config) = Self::load(&project_config) {
                    return config.with_env_overrides();
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("groundwork/config.toml");
            if user_config.exists() {
                if let Ok(config) = Self::load(&user_config) {
                    return config.with_env_overrides();
                }
            }
        }

        // Return defaults with env overrides
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides (GROUNDWORK_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        // GROUNDWORK_INSTALLER
        if let Ok(command) = std::env::var("GROUNDWORK_INSTALLER") {
            if !command.trim().is_empty() {
                self.installer.command = command;
            }
        }

        // GROUNDWORK_MANIFEST
        if let Ok(manifest) = std::env::var("GROUNDWORK_MANIFEST") {
            if !manifest.trim().is_empty() {
                self.installer.manifest = PathBuf::from(manifest);
            }
        }

        // GROUNDWORK_MOUNT
        if let Ok(mount) = std::env::var("GROUNDWORK_MOUNT") {
            if !mount.trim().is_empty() {
                self.disk.mount = PathBuf::from(mount);
            }
        }

        // GROUNDWORK_DIRECTORIES (comma-separated)
        if let Ok(directories) = std::env::var("GROUNDWORK_DIRECTORIES") {
            let parsed: Vec<PathBuf> = directories
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
            if !parsed.is_empty() {
                self.disk.directories = parsed;
            }
        }

        self
    }

    /// Resolve the configured directories against the mount point.
    ///
    /// Relative entries are joined onto the mount; absolute entries are
    /// kept as-is.
    pub fn target_directories(&self) -> Vec<PathBuf> {
        self.disk
            .directories
            .iter()
            .map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    self.disk.mount.join(dir)
                }
            })
            .collect()
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "installer",
        "command",
        "args",
        "manifest",
        "disk",
        "mount",
        "directories",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = std::cmp::min(
                std::cmp::min(prev[j + 1] + 1, curr[j] + 1),
                prev[j] + cost,
            );
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
