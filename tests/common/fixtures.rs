//! Test fixtures - reusable content constants for tests.

/// A typical web-app manifest
pub const REQUIREMENTS_BASIC: &str = "flask==3.0.3\ngunicorn==22.0.0\nrequests==2.32.3\n";

/// Same manifest with one version bumped (for drift tests)
pub const REQUIREMENTS_UPDATED: &str = "flask==3.0.3\ngunicorn==22.0.0\nrequests==2.32.4\n";

/// A manifest pinning a package no index would resolve
pub const REQUIREMENTS_UNRESOLVABLE: &str = "no-such-package-xyz==99.99.99\n";
