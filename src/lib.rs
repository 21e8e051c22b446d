//! dockstrap library
//!
//! Core functionality for resolving the Docker Engine package repository
//! target on Debian-family systems: OS fact gathering, architecture and
//! codename detection, and the pure resolution logic that ties them
//! together.

pub mod cli;
pub mod codename;
pub mod error;
pub mod facts;
pub mod hardware;
pub mod logic;
pub mod sanity;
pub mod types;

// Re-export main types for convenience
pub use codename::{CodenameLookup, NoCodenameLookup, SystemCodenameLookup};
pub use error::{DockstrapError, ResolveError, Result};
pub use facts::OsFacts;
pub use hardware::{debian_arch_for_machine, detect_architecture, detect_dpkg_architecture};
pub use logic::resolver::{
    resolve, CodenameSource, Resolution, ResolutionNote, ResolveOptions,
};
pub use sanity::{verify_environment, SanityReport};
pub use types::{RepoFamily, RepositoryDescriptor};
