//! OS identification facts
//!
//! Gathers the raw signals the resolver decides on by parsing the
//! os-release file. Parsing is separated from file access so every shape of
//! input can be covered in tests without touching a real system.
//!
//! # Design
//!
//! - **Facts, not judgements**: missing keys become empty/absent fields;
//!   deciding whether that is fatal is the resolver's job
//! - **Normalized input**: `ID` and `ID_LIKE` are lowercased here so the
//!   resolver never has to care about case
//! - **No hidden environment**: callers pass an explicit path (or use the
//!   standard locations via `gather()`)

use crate::error::{DockstrapError, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Primary os-release location.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Fallback location used when `/etc/os-release` is absent.
pub const OS_RELEASE_FALLBACK_PATH: &str = "/usr/lib/os-release";

/// Raw OS-identification facts, read once per run.
///
/// Field semantics follow the os-release format: `id` is the lowercase
/// distro identifier, `id_like` the ordered fallback identifiers, and
/// `version_codename` the release codename when the distribution publishes
/// one. `pretty_name` is carried for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsFacts {
    pub id: String,
    pub id_like: Vec<String>,
    pub version_codename: Option<String>,
    pub pretty_name: Option<String>,
}

impl OsFacts {
    /// Read facts from the standard os-release locations.
    ///
    /// Tries `/etc/os-release` first, then `/usr/lib/os-release`. A missing
    /// or unreadable source is an error: without identification facts there
    /// is nothing to resolve.
    pub fn gather() -> Result<Self> {
        for path in [OS_RELEASE_PATH, OS_RELEASE_FALLBACK_PATH] {
            if Path::new(path).exists() {
                tracing::debug!("reading OS facts from {}", path);
                return Self::from_file(Path::new(path));
            }
        }
        Err(DockstrapError::facts(format!(
            "no os-release file found (tried {} and {})",
            OS_RELEASE_PATH, OS_RELEASE_FALLBACK_PATH
        )))
    }

    /// Read facts from a specific os-release file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DockstrapError::facts(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self::parse(&content))
    }

    /// Parse os-release content.
    ///
    /// Accepts `KEY=VALUE` lines; blank lines and `#` comments are skipped,
    /// surrounding single or double quotes are stripped. Unknown keys are
    /// ignored. Later occurrences of a key win, matching shell sourcing
    /// semantics.
    pub fn parse(content: &str) -> Self {
        let mut facts = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, raw_value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(raw_value.trim());

            match key.trim() {
                "ID" => facts.id = value.to_lowercase(),
                "ID_LIKE" => {
                    facts.id_like = value
                        .split_whitespace()
                        .map(|token| token.to_lowercase())
                        .collect();
                }
                "VERSION_CODENAME" => {
                    facts.version_codename = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    };
                }
                "PRETTY_NAME" => {
                    facts.pretty_name = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    };
                }
                _ => {}
            }
        }

        facts
    }
}

impl fmt::Display for OsFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, id_like=[{}], codename={}",
            if self.id.is_empty() { "?" } else { self.id.as_str() },
            self.id_like.join(", "),
            self.version_codename.as_deref().unwrap_or("?"),
        )
    }
}

/// Strip one layer of surrounding single or double quotes.
fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}
