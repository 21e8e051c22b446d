//! Pre-flight sanity checks for the runtime environment
//!
//! Verifies that resolution has something to work with before any detection
//! runs:
//! - An os-release file is present and readable
//! - Detection helper binaries are available
//!
//! Resolution is read-only, so root is never required; the effective uid is
//! reported because the layers that consume the descriptor will need it.

use crate::facts::{OS_RELEASE_FALLBACK_PATH, OS_RELEASE_PATH};
use std::path::Path;
use std::process::Command;

/// Result of environment verification
#[derive(Debug)]
pub struct SanityReport {
    /// The os-release path that will be used, if any was found.
    pub facts_source: Option<&'static str>,
    /// Detection helpers not found in PATH. Missing helpers degrade
    /// detection quality but are not fatal on their own.
    pub missing_binaries: Vec<String>,
    /// Effective uid is 0. Informational only.
    pub is_root: bool,
}

impl SanityReport {
    /// Returns true if resolution is possible at all.
    ///
    /// Only the facts source is required: architecture detection chains
    /// through several sources and the codename lookup is best-effort.
    pub fn is_ok(&self) -> bool {
        self.facts_source.is_some()
    }
}

/// Binaries the detection chain can make use of.
///
/// `dpkg` gives the authoritative architecture, `uname` is its fallback,
/// `lsb_release` is one of the codename fallback sources.
const DETECTION_BINARIES: &[&str] = &["dpkg", "uname", "lsb_release"];

/// Check if a binary is available in PATH
fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Check if running as root (EUID 0)
fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Perform all sanity checks and return the report
pub fn verify_environment() -> SanityReport {
    let facts_source = [OS_RELEASE_PATH, OS_RELEASE_FALLBACK_PATH]
        .into_iter()
        .find(|path| Path::new(path).is_file());

    let mut missing = Vec::new();
    for binary in DETECTION_BINARIES {
        if !binary_exists(binary) {
            tracing::debug!("detection helper not found: {}", binary);
            missing.push((*binary).to_string());
        }
    }

    SanityReport {
        facts_source,
        missing_binaries: missing,
        is_root: is_running_as_root(),
    }
}
