//! Property tests for directory provisioning.

use proptest::prelude::*;

use groundwork::provision::{ensure_directory, DirOutcome};

fn segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[a-z0-9][a-z0-9_-]{0,11}").unwrap();
    proptest::collection::vec(segment, 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: provisioning is idempotent - the first pass creates the
    /// directory, a second pass reports it as existing, and neither fails.
    #[test]
    fn property_ensure_directory_idempotent(
        segs in segments()
    ) {
        let root = tempfile::tempdir().unwrap();
        let mut path = root.path().to_path_buf();
        for seg in &segs {
            path.push(seg);
        }

        let first = ensure_directory(&path, false).unwrap();
        prop_assert_eq!(first, DirOutcome::Created);
        prop_assert!(path.is_dir());

        let second = ensure_directory(&path, false).unwrap();
        prop_assert_eq!(second, DirOutcome::Existing);
    }

    /// PROPERTY: dry run never mutates the filesystem.
    #[test]
    fn property_dry_run_never_creates(
        segs in segments()
    ) {
        let root = tempfile::tempdir().unwrap();
        let mut path = root.path().to_path_buf();
        for seg in &segs {
            path.push(seg);
        }

        let outcome = ensure_directory(&path, true).unwrap();
        prop_assert_eq!(outcome, DirOutcome::Created);
        prop_assert!(!path.exists());
    }
}
