//! Fallback release-codename detection
//!
//! Some Debian-family systems omit `VERSION_CODENAME` from os-release
//! (older Raspbian images are the usual case). This module is the secondary
//! detection source the resolver consults: a small collaborator trait so
//! the resolver itself stays pure, with a system-backed implementation and
//! a no-op one for callers that forbid secondary detection.

// Library API - consumed by resolution logic
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Path consulted when `lsb_release` is unavailable.
pub const DEBIAN_VERSION_PATH: &str = "/etc/debian_version";

/// Best-effort codename source consulted only when os-release has none.
///
/// Implementations return `None` rather than erroring; the resolver turns
/// an exhausted lookup into its own typed failure.
pub trait CodenameLookup {
    fn lookup(&self) -> Option<String>;
}

/// Looks up the codename from the running system.
///
/// Source order:
/// 1. `lsb_release -cs`
/// 2. `/etc/debian_version`, either a numeric version whose major maps to
///    a known release or a `codename/sid` form
pub struct SystemCodenameLookup;

impl CodenameLookup for SystemCodenameLookup {
    fn lookup(&self) -> Option<String> {
        if let Some(codename) = lsb_release_codename() {
            debug!("codename from lsb_release: {}", codename);
            return Some(codename);
        }
        if let Some(codename) = debian_version_codename(Path::new(DEBIAN_VERSION_PATH)) {
            debug!("codename from {}: {}", DEBIAN_VERSION_PATH, codename);
            return Some(codename);
        }
        None
    }
}

/// Never yields a codename. Used in tests and by callers that want
/// resolution to depend on os-release alone.
pub struct NoCodenameLookup;

impl CodenameLookup for NoCodenameLookup {
    fn lookup(&self) -> Option<String> {
        None
    }
}

/// Codename for a Debian major release number.
pub fn codename_for_debian_major(major: u32) -> Option<&'static str> {
    match major {
        10 => Some("buster"),
        11 => Some("bullseye"),
        12 => Some("bookworm"),
        13 => Some("trixie"),
        _ => None,
    }
}

fn lsb_release_codename() -> Option<String> {
    let output = Command::new("lsb_release").arg("-cs").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let codename = String::from_utf8_lossy(&output.stdout).trim().to_lowercase();
    if codename.is_empty() || codename == "n/a" {
        None
    } else {
        Some(codename)
    }
}

/// Parse a debian_version file.
///
/// Stable releases contain `MAJOR.MINOR` (e.g. `12.5`); testing/unstable
/// contain `CODENAME/sid` (e.g. `trixie/sid`). Anything else yields `None`.
fn debian_version_codename(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let content = content.trim();

    if content.chars().next()?.is_ascii_digit() {
        let major: u32 = content.split('.').next()?.parse().ok()?;
        return codename_for_debian_major(major).map(str::to_string);
    }

    let codename = content.split('/').next()?.trim();
    if codename.is_empty() {
        None
    } else {
        Some(codename.to_lowercase())
    }
}
