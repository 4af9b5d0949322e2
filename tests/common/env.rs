//! Test environment builder for isolated Groundwork testing.
//!
//! Provides `TestEnv` - an isolated environment with temp directories for
//! the project (working directory, manifest, config) and for the persistent
//! mount, plus a fake package-manager script so no real installer runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::REQUIREMENTS_BASIC;

/// Result of running a Groundwork CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
///
/// Provides:
/// - Isolated project directory (working directory for the CLI)
/// - Isolated mount directory standing in for the persistent volume
/// - A fake installer script that records its invocation in a marker file
/// - CLI command execution helpers
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Temporary directory for the persistent-volume mount
    pub mount_dir: TempDir,
    /// Path to the groundwork binary
    bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Get path relative to the mount directory
    pub fn mount_path(&self, relative: &str) -> PathBuf {
        self.mount_dir.path().join(relative)
    }

    /// Marker file touched by the fake installer when it runs
    pub fn marker_path(&self) -> PathBuf {
        self.project_path(".install-invoked")
    }

    /// Run groundwork CLI in this environment from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run groundwork CLI with extra environment variables.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path()).args(args);

        // Isolate from any GROUNDWORK_* set in the outer environment.
        for key in [
            "GROUNDWORK_INSTALLER",
            "GROUNDWORK_MANIFEST",
            "GROUNDWORK_MOUNT",
            "GROUNDWORK_DIRECTORIES",
        ] {
            cmd.env_remove(key);
        }

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute groundwork");

        self.output_to_result(output)
    }

    /// Convert Command output to TestResult
    fn output_to_result(&self, output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    manifest: Option<String>,
    installer_exit: i32,
    directories: Vec<String>,
    extra_config: Option<String>,
}

impl TestEnvBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            manifest: Some(REQUIREMENTS_BASIC.to_string()),
            installer_exit: 0,
            directories: vec!["uploads".to_string(), "quotes".to_string()],
            extra_config: None,
        }
    }

    /// Set the manifest content written to requirements.txt
    pub fn with_manifest(mut self, content: &str) -> Self {
        self.manifest = Some(content.to_string());
        self
    }

    /// Do not write a manifest file
    pub fn without_manifest(mut self) -> Self {
        self.manifest = None;
        self
    }

    /// Exit code of the fake installer script
    pub fn with_installer_exit(mut self, code: i32) -> Self {
        self.installer_exit = code;
        self
    }

    /// Override the configured directory list
    pub fn with_directories(mut self, dirs: &[&str]) -> Self {
        self.directories = dirs.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Extra TOML appended to the generated groundwork.toml
    pub fn with_extra_config(mut self, toml: &str) -> Self {
        self.extra_config = Some(toml.to_string());
        self
    }

    /// Build the TestEnv
    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");
        let mount_dir = TempDir::new().expect("Failed to create mount temp dir");

        let bin = PathBuf::from(env!("CARGO_BIN_EXE_groundwork"));

        // Fake package manager: records its invocation, then exits as told.
        let script = project_root.path().join("fake-pm.sh");
        let marker = project_root.path().join(".install-invoked");
        write_installer_script(&script, &marker, self.installer_exit);

        // Manifest
        if let Some(content) = &self.manifest {
            std::fs::write(project_root.path().join("requirements.txt"), content)
                .expect("Failed to write manifest");
        }

        // Project config wiring the fake installer and the temp mount
        let directories = self
            .directories
            .iter()
            .map(|d| format!("\"{}\"", d))
            .collect::<Vec<_>>()
            .join(", ");
        let mut config = format!(
            r#"[installer]
command = "{script}"
args = []
manifest = "requirements.txt"

[disk]
mount = "{mount}"
directories = [{directories}]
"#,
            script = script.display(),
            mount = mount_dir.path().display(),
        );
        if let Some(extra) = &self.extra_config {
            config.push_str(extra);
        }
        std::fs::write(project_root.path().join("groundwork.toml"), config)
            .expect("Failed to write groundwork.toml");

        TestEnv {
            project_root,
            mount_dir,
            bin,
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_installer_script(script: &Path, marker: &Path, exit_code: i32) {
    let content = format!(
        "#!/bin/sh\necho \"fake-pm: installing from $1\"\ntouch \"{}\"\nexit {}\n",
        marker.display(),
        exit_code
    );
    std::fs::write(script, content).expect("Failed to write installer script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark installer script executable");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_writes_manifest_and_config() {
        let env = TestEnv::builder().build();

        assert!(env.project_path("requirements.txt").exists());
        assert!(env.project_path("groundwork.toml").exists());
        assert!(env.project_path("fake-pm.sh").exists());
    }

    #[test]
    fn test_builder_without_manifest() {
        let env = TestEnv::builder().without_manifest().build();

        assert!(!env.project_path("requirements.txt").exists());
    }

    #[test]
    fn test_mount_starts_empty() {
        let env = TestEnv::builder().build();

        assert!(!env.mount_path("uploads").exists());
        assert!(!env.mount_path("quotes").exists());
    }
}
