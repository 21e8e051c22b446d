//! Machine architecture detection
//!
//! Determines the Debian package architecture for the running machine.
//! The authoritative answer comes from `dpkg --print-architecture`; when
//! dpkg is unavailable (minimal containers, foreign-distro testing) the
//! kernel machine name from `uname -m` is mapped to its Debian equivalent.
//!
//! # Design
//!
//! - **Degrade, don't fail**: every source failure falls through to the
//!   next source; only a fully empty result is an error
//! - **Pass-through for unknowns**: machine names without a known mapping
//!   are returned unchanged; the resolver only requires non-empty

// Library API - consumed by the CLI layer
#![allow(dead_code)]

use crate::error::{DockstrapError, Result};
use anyhow::Context;
use std::process::Command;
use tracing::{debug, warn};

/// Detect the Debian package architecture.
///
/// Source order:
/// 1. `dpkg --print-architecture` (what apt will actually install for)
/// 2. `uname -m`, mapped via [`debian_arch_for_machine`]
pub fn detect_architecture() -> Result<String> {
    if let Some(arch) = command_stdout("dpkg", &["--print-architecture"]) {
        debug!("architecture from dpkg: {}", arch);
        return Ok(arch);
    }
    warn!("dpkg unavailable, falling back to uname -m");

    if let Some(machine) = command_stdout("uname", &["-m"]) {
        let arch = debian_arch_for_machine(&machine).to_string();
        debug!("architecture from uname: {} (machine {})", arch, machine);
        return Ok(arch);
    }

    Err(DockstrapError::detect(
        "neither dpkg nor uname produced an architecture".to_string(),
    ))
}

/// Map a kernel machine name (`uname -m`) to a Debian package architecture.
///
/// Unknown machine names pass through unchanged so new architectures are
/// not rejected here.
pub fn debian_arch_for_machine(machine: &str) -> &str {
    match machine {
        "x86_64" | "amd64" => "amd64",
        "aarch64" | "arm64" => "arm64",
        "armv7l" | "armv6l" | "armhf" => "armhf",
        "i386" | "i486" | "i586" | "i686" => "i386",
        "ppc64le" => "ppc64el",
        other => other,
    }
}

/// Detect the architecture from dpkg alone, with error context.
///
/// Unlike `detect_architecture()`, which falls back to `uname -m`, this
/// variant insists on dpkg's answer (the architecture apt will actually
/// install for) and errors when dpkg cannot be consulted.
pub fn detect_dpkg_architecture() -> anyhow::Result<String> {
    let output = Command::new("dpkg")
        .arg("--print-architecture")
        .output()
        .context("failed to run dpkg; is this a Debian-family system?")?;

    if !output.status.success() {
        anyhow::bail!("dpkg --print-architecture exited with {}", output.status);
    }

    let arch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if arch.is_empty() {
        anyhow::bail!("dpkg --print-architecture produced no output");
    }
    Ok(arch)
}

/// Run a command and return its trimmed stdout, or `None` on any failure.
///
/// A missing binary, non-zero exit and empty output all map to `None`;
/// callers treat every one of those as "try the next source".
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            debug!("failed to run {}: {}", program, e);
            return None;
        }
    };

    if !output.status.success() {
        debug!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() { None } else { Some(stdout) }
}
