use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GroundworkResult;

const STATE_FILE: &str = ".groundwork-state.json";

/// Runtime state persisted between runs
/// Stored in `<mount>/.groundwork-state.json` on the persistent disk, so
/// the record lives and dies with the volume it describes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuntimeState {
    /// Last fully successful bootstrap, if any
    #[serde(default)]
    pub last_run: Option<LastRun>,
}

/// Record of a completed bootstrap sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastRun {
    /// Content digest of the manifest that was installed
    pub manifest_digest: String,
    /// Completion time of the run
    pub completed_at: DateTime<Utc>,
    /// Directories that existed when the run finished
    pub directories: Vec<PathBuf>,
}

impl RuntimeState {
    /// Load state from `<mount>/.groundwork-state.json`
    pub fn load(mount: &Path) -> Self {
        let state_file = mount.join(STATE_FILE);
        if state_file.exists() {
            if let Ok(content) = fs::read_to_string(&state_file) {
                if let Ok(state) = serde_json::from_str(&content) {
                    return state;
                }
            }
        }
        Self::default()
    }

    /// Save state to `<mount>/.groundwork-state.json`
    pub fn save(&self, mount: &Path) -> std::io::Result<()> {
        let state_file = mount.join(STATE_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(state_file, content)
    }

    /// Record a completed bootstrap and save
    pub fn record_run(&mut self, manifest_digest: String, directories: Vec<PathBuf>, mount: &Path) {
        self.last_run = Some(LastRun {
            manifest_digest,
            completed_at: Utc::now(),
            directories,
        });
        let _ = self.save(mount);
    }
}

/// Content digest of the manifest file, in the `sha256:<hex>` form used
/// throughout the state record.
pub fn manifest_digest(path: &Path) -> GroundworkResult<String> {
    use sha2::{Digest, Sha256};
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("sha256:{:x}", hasher.finalize()))
}
