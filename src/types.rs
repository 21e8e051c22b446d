//! Core vocabulary for repository resolution
//!
//! This module replaces stringly-typed repository targets with proper Rust
//! enums and structs that provide compile-time validation and exhaustive
//! matching.

// Library API - consumed by resolution logic
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Upstream package-repository family.
///
/// Selects the path segment of the upstream Docker repository
/// (`.../linux/ubuntu` vs `.../linux/debian`). Every Debian-family
/// derivative maps onto one of these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RepoFamily {
    #[strum(serialize = "ubuntu")]
    Ubuntu,
    #[strum(serialize = "debian")]
    Debian,
}

impl RepoFamily {
    /// Repository path segment as used by the upstream package server.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ubuntu => "ubuntu",
            Self::Debian => "debian",
        }
    }
}

/// A fully resolved repository target.
///
/// Either every field is populated and internally consistent, or resolution
/// fails with a typed error; there is no partially-valid descriptor.
/// Derived once per run, consumed by the package-manager layer, discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Which upstream repository path to use.
    pub family: RepoFamily,
    /// Release codename placed in the repository line (e.g. "bookworm").
    pub codename: String,
    /// Package architecture identifier (e.g. "amd64", "arm64", "armhf").
    pub architecture: String,
}
