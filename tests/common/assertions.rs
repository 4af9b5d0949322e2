//! Custom assertion macros for Groundwork CLI tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                for sub in list_all_files(&path) {
                    files.push(sub);
                }
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that a directory was provisioned under the mount point.
///
/// # Example
/// ```ignore
/// assert_provisioned!(env, "uploads");
/// ```
#[macro_export]
macro_rules! assert_provisioned {
    ($env:expr, $path:expr) => {
        let full_path = $env.mount_path($path);
        assert!(
            full_path.is_dir(),
            "Expected directory at '{}' under the mount, but it doesn't exist.\n\
             Mount root: {:?}\n\
             Files found:\n  {}",
            $path,
            $env.mount_dir.path(),
            $crate::common::list_all_files($env.mount_dir.path()).join("\n  ")
        );
    };
}

/// Assert that a directory was NOT provisioned (should not exist).
///
/// # Example
/// ```ignore
/// assert_not_provisioned!(env, "quotes");
/// ```
#[macro_export]
macro_rules! assert_not_provisioned {
    ($env:expr, $path:expr) => {
        let full_path = $env.mount_path($path);
        assert!(
            !full_path.is_dir(),
            "Expected '{}' to NOT exist under the mount, but it does.\n\
             Mount root: {:?}",
            $path,
            $env.mount_dir.path()
        );
    };
}

/// Assert that output (stdout or stderr) contains expected pattern.
///
/// # Example
/// ```ignore
/// assert_output_contains!(result, "Runtime ready");
/// ```
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            $result.stdout.contains($pattern) || $result.stderr.contains($pattern),
            "Expected output to contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that output does NOT contain a pattern.
///
/// # Example
/// ```ignore
/// assert_output_not_contains!(result, "Created");
/// ```
#[macro_export]
macro_rules! assert_output_not_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            !$result.stdout.contains($pattern) && !$result.stderr.contains($pattern),
            "Expected output to NOT contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}
