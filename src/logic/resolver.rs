//! Repository target resolver
//!
//! Decides a consistent repository target from ambiguous, possibly-missing
//! OS signals, never silently guessing a codename.
//!
//! # Design
//!
//! - **Pure logic**: no I/O, no mutation; the codename lookup collaborator
//!   is injected, so every path is unit-testable without a real machine
//! - **All or nothing**: either every descriptor field is populated, or
//!   resolution fails with a typed error carrying the raw inputs
//! - **Diagnostics as data**: the forced-fallback warning is returned as a
//!   note on the result, not logged from here; callers control presentation
//!
//! # Resolution Rules
//!
//! | Signal                          | Resolved To |
//! |---------------------------------|-------------|
//! | `id` is ubuntu/debian           | That family |
//! | `id_like` token contains ubuntu | Ubuntu      |
//! | `id_like` token contains debian | Debian      |
//! | nothing matched, `force` set    | Debian, with a fallback note |
//! | `--codename` override           | Used verbatim |
//! | `VERSION_CODENAME`              | Used as-is  |
//! | codename lookup collaborator    | Last resort |

// Library API - consumed by the CLI layer
#![allow(dead_code)]

use crate::codename::CodenameLookup;
use crate::error::ResolveError;
use crate::facts::OsFacts;
use crate::types::{RepoFamily, RepositoryDescriptor};
use serde::Serialize;
use std::fmt;

// ============================================================================
// Inputs
// ============================================================================

/// Caller-controlled knobs for a resolution run.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Treat an unrecognized distribution as Debian-compatible.
    pub force: bool,
    /// Release codename to use verbatim, bypassing detection.
    pub codename_override: Option<String>,
}

// ============================================================================
// Outputs
// ============================================================================

/// Which source supplied the resolved codename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodenameSource {
    /// Caller-supplied override.
    Override,
    /// `VERSION_CODENAME` from the os-release facts.
    OsRelease,
    /// Secondary lookup collaborator.
    Lookup,
}

impl fmt::Display for CodenameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "--codename override"),
            Self::OsRelease => write!(f, "os-release"),
            Self::Lookup => write!(f, "fallback lookup"),
        }
    }
}

/// Non-fatal diagnostics attached to a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionNote {
    /// No supported family matched and `force` selected the Debian
    /// repository anyway.
    ForcedDebianFallback { id: String },
}

impl fmt::Display for ResolutionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForcedDebianFallback { id } => write!(
                f,
                "'{}' is not a recognized Debian-family distribution; using the debian repository because --force was given",
                id
            ),
        }
    }
}

/// A successful resolution: the descriptor plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub descriptor: RepositoryDescriptor,
    pub codename_source: CodenameSource,
    pub notes: Vec<ResolutionNote>,
}

impl Resolution {
    /// True when the family came from the forced Debian fallback.
    pub fn is_forced(&self) -> bool {
        self.notes
            .iter()
            .any(|note| matches!(note, ResolutionNote::ForcedDebianFallback { .. }))
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the repository target for the given facts.
///
/// The architecture is validated first so an empty value fails the same way
/// regardless of every other field. Family and codename are then decided by
/// their priority chains, and the first failure aborts the run; a descriptor is
/// never partially applied.
pub fn resolve(
    facts: &OsFacts,
    arch: &str,
    opts: &ResolveOptions,
    lookup: &dyn CodenameLookup,
) -> Result<Resolution, ResolveError> {
    if arch.trim().is_empty() {
        return Err(ResolveError::InvalidArchitecture);
    }

    let mut notes = Vec::new();
    let family = determine_family(facts, opts.force, &mut notes)?;
    let (codename, codename_source) = determine_codename(facts, opts, lookup)?;

    Ok(Resolution {
        descriptor: RepositoryDescriptor {
            family,
            codename,
            architecture: arch.to_string(),
        },
        codename_source,
        notes,
    })
}

/// Family priority chain, first match wins.
///
/// `ID` is authoritative; `ID_LIKE` tokens are substring-matched so values
/// like `"ubuntu-core"` still resolve. The forced Debian fallback applies
/// only when nothing matched and always attaches a note.
fn determine_family(
    facts: &OsFacts,
    force: bool,
    notes: &mut Vec<ResolutionNote>,
) -> Result<RepoFamily, ResolveError> {
    match facts.id.as_str() {
        "ubuntu" => return Ok(RepoFamily::Ubuntu),
        "debian" => return Ok(RepoFamily::Debian),
        _ => {}
    }

    if facts.id_like.iter().any(|token| token.contains("ubuntu")) {
        return Ok(RepoFamily::Ubuntu);
    }
    if facts.id_like.iter().any(|token| token.contains("debian")) {
        return Ok(RepoFamily::Debian);
    }

    if force {
        notes.push(ResolutionNote::ForcedDebianFallback {
            id: facts.id.clone(),
        });
        return Ok(RepoFamily::Debian);
    }

    Err(ResolveError::UnsupportedDistro {
        id: facts.id.clone(),
        id_like: facts.id_like.clone(),
    })
}

/// Codename priority chain: override, os-release, lookup collaborator.
///
/// An undetermined codename is fatal even under `force`: an empty value
/// would generate a syntactically invalid, network-fetching repository line.
/// A blank override is treated as absent; the descriptor invariant requires
/// a non-empty codename.
fn determine_codename(
    facts: &OsFacts,
    opts: &ResolveOptions,
    lookup: &dyn CodenameLookup,
) -> Result<(String, CodenameSource), ResolveError> {
    if let Some(name) = opts.codename_override.as_deref() {
        if !name.trim().is_empty() {
            return Ok((name.to_string(), CodenameSource::Override));
        }
    }

    if let Some(name) = facts.version_codename.as_deref() {
        if !name.is_empty() {
            return Ok((name.to_string(), CodenameSource::OsRelease));
        }
    }

    if let Some(name) = lookup.lookup() {
        let name = name.trim();
        if !name.is_empty() {
            return Ok((name.to_string(), CodenameSource::Lookup));
        }
    }

    Err(ResolveError::UndeterminedCodename {
        id: facts.id.clone(),
        sources: vec!["os-release".to_string(), "codename lookup".to_string()],
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codename::NoCodenameLookup;

    /// Lookup collaborator with a canned answer.
    struct FixedLookup(Option<&'static str>);

    impl CodenameLookup for FixedLookup {
        fn lookup(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn facts(id: &str, id_like: &[&str], codename: Option<&str>) -> OsFacts {
        OsFacts {
            id: id.to_string(),
            id_like: id_like.iter().map(|s| s.to_string()).collect(),
            version_codename: codename.map(str::to_string),
            pretty_name: None,
        }
    }

    #[test]
    fn test_ubuntu_id_resolves_ubuntu() {
        let result = resolve(
            &facts("ubuntu", &[], Some("jammy")),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect("Should resolve");

        assert_eq!(result.descriptor.family, RepoFamily::Ubuntu);
        assert_eq!(result.descriptor.codename, "jammy");
        assert_eq!(result.descriptor.architecture, "amd64");
        assert_eq!(result.codename_source, CodenameSource::OsRelease);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_ubuntu_id_wins_over_debian_id_like() {
        // ID is authoritative regardless of ID_LIKE contents
        let result = resolve(
            &facts("ubuntu", &["debian"], Some("noble")),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect("Should resolve");
        assert_eq!(result.descriptor.family, RepoFamily::Ubuntu);
    }

    #[test]
    fn test_debian_id_resolves_debian() {
        let result = resolve(
            &facts("debian", &[], Some("bookworm")),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect("Should resolve");
        assert_eq!(result.descriptor.family, RepoFamily::Debian);
    }

    #[test]
    fn test_id_like_ubuntu_checked_before_debian() {
        // Mint-style: both tokens present, ubuntu has priority
        let result = resolve(
            &facts("linuxmint", &["ubuntu", "debian"], Some("virginia")),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect("Should resolve");
        assert_eq!(result.descriptor.family, RepoFamily::Ubuntu);
    }

    #[test]
    fn test_id_like_substring_match() {
        let result = resolve(
            &facts("custom", &["ubuntu-core"], Some("noble")),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect("Should resolve");
        assert_eq!(result.descriptor.family, RepoFamily::Ubuntu);
    }

    #[test]
    fn test_raspbian_resolves_debian_via_id_like() {
        let result = resolve(
            &facts("raspbian", &["debian"], None),
            "armhf",
            &ResolveOptions::default(),
            &FixedLookup(Some("bookworm")),
        )
        .expect("Should resolve");

        assert_eq!(result.descriptor.family, RepoFamily::Debian);
        assert_eq!(result.descriptor.codename, "bookworm");
        assert_eq!(result.descriptor.architecture, "armhf");
        assert_eq!(result.codename_source, CodenameSource::Lookup);
    }

    #[test]
    fn test_unknown_distro_fails_without_force() {
        let err = resolve(
            &facts("fedora", &["rhel"], Some("whatever")),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect_err("Should fail");

        match err {
            ResolveError::UnsupportedDistro { id, id_like } => {
                assert_eq!(id, "fedora");
                assert_eq!(id_like, vec!["rhel"]);
            }
            other => panic!("Expected UnsupportedDistro, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_distro_with_force_falls_back_to_debian() {
        let opts = ResolveOptions {
            force: true,
            codename_override: None,
        };
        let result = resolve(
            &facts("fedora", &["rhel"], Some("bullseye")),
            "x86_64",
            &opts,
            &NoCodenameLookup,
        )
        .expect("Should resolve under force");

        assert_eq!(result.descriptor.family, RepoFamily::Debian);
        assert_eq!(result.descriptor.codename, "bullseye");
        assert_eq!(result.descriptor.architecture, "x86_64");
        assert!(result.is_forced());
        assert_eq!(
            result.notes,
            vec![ResolutionNote::ForcedDebianFallback {
                id: "fedora".to_string()
            }]
        );
    }

    #[test]
    fn test_force_does_not_note_supported_distros() {
        let opts = ResolveOptions {
            force: true,
            codename_override: None,
        };
        let result = resolve(
            &facts("debian", &[], Some("bookworm")),
            "amd64",
            &opts,
            &NoCodenameLookup,
        )
        .expect("Should resolve");
        assert!(!result.is_forced());
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_codename_override_wins() {
        let opts = ResolveOptions {
            force: false,
            codename_override: Some("focal".to_string()),
        };
        let result = resolve(
            &facts("ubuntu", &[], Some("jammy")),
            "amd64",
            &opts,
            &FixedLookup(Some("noble")),
        )
        .expect("Should resolve");

        assert_eq!(result.descriptor.codename, "focal");
        assert_eq!(result.codename_source, CodenameSource::Override);
    }

    #[test]
    fn test_blank_codename_override_is_ignored() {
        let opts = ResolveOptions {
            force: false,
            codename_override: Some("   ".to_string()),
        };
        let result = resolve(
            &facts("ubuntu", &[], Some("jammy")),
            "amd64",
            &opts,
            &NoCodenameLookup,
        )
        .expect("Should resolve");

        assert_eq!(result.descriptor.codename, "jammy");
        assert_eq!(result.codename_source, CodenameSource::OsRelease);
    }

    #[test]
    fn test_lookup_consulted_only_when_os_release_empty() {
        let result = resolve(
            &facts("debian", &[], None),
            "amd64",
            &ResolveOptions::default(),
            &FixedLookup(Some("bullseye")),
        )
        .expect("Should resolve");

        assert_eq!(result.descriptor.codename, "bullseye");
        assert_eq!(result.codename_source, CodenameSource::Lookup);
    }

    #[test]
    fn test_undetermined_codename_is_fatal() {
        let err = resolve(
            &facts("debian", &[], None),
            "amd64",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect_err("Should fail");

        assert!(matches!(err, ResolveError::UndeterminedCodename { .. }));
    }

    #[test]
    fn test_undetermined_codename_fatal_even_under_force() {
        let opts = ResolveOptions {
            force: true,
            codename_override: None,
        };
        let err = resolve(
            &facts("unknownos", &[], None),
            "amd64",
            &opts,
            &NoCodenameLookup,
        )
        .expect_err("Should fail");

        match err {
            ResolveError::UndeterminedCodename { id, sources } => {
                assert_eq!(id, "unknownos");
                assert!(sources.contains(&"os-release".to_string()));
                assert!(sources.contains(&"codename lookup".to_string()));
            }
            other => panic!("Expected UndeterminedCodename, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_lookup_answer_does_not_count() {
        let err = resolve(
            &facts("debian", &[], None),
            "amd64",
            &ResolveOptions::default(),
            &FixedLookup(Some("  ")),
        )
        .expect_err("Should fail");
        assert!(matches!(err, ResolveError::UndeterminedCodename { .. }));
    }

    #[test]
    fn test_empty_architecture_fails_first() {
        // Fails on arch even though family and codename would also fail
        let err = resolve(
            &facts("fedora", &[], None),
            "",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect_err("Should fail");
        assert_eq!(err, ResolveError::InvalidArchitecture);
    }

    #[test]
    fn test_blank_architecture_fails() {
        let err = resolve(
            &facts("ubuntu", &[], Some("jammy")),
            "   ",
            &ResolveOptions::default(),
            &NoCodenameLookup,
        )
        .expect_err("Should fail");
        assert_eq!(err, ResolveError::InvalidArchitecture);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let input = facts("raspbian", &["debian"], None);
        let opts = ResolveOptions::default();
        let lookup = FixedLookup(Some("bookworm"));

        let first = resolve(&input, "armhf", &opts, &lookup).expect("Should resolve");
        let second = resolve(&input, "armhf", &opts, &lookup).expect("Should resolve");
        assert_eq!(first, second);
    }

    #[test]
    fn test_note_display_names_the_distro() {
        let note = ResolutionNote::ForcedDebianFallback {
            id: "fedora".to_string(),
        };
        let msg = note.to_string();
        assert!(msg.contains("fedora"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_codename_source_display() {
        assert_eq!(CodenameSource::Override.to_string(), "--codename override");
        assert_eq!(CodenameSource::OsRelease.to_string(), "os-release");
        assert_eq!(CodenameSource::Lookup.to_string(), "fallback lookup");
    }
}
