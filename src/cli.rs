use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dockstrap - resolve the Docker Engine package repository target
#[derive(Parser)]
#[command(name = "dockstrap")]
#[command(about = "Determines which Docker Engine apt repository matches this system")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the repository family, codename and architecture
    Resolve(ResolveArgs),
    /// Show the OS identification facts that feed resolution
    Facts {
        /// Alternate os-release file to read
        #[arg(long, value_name = "PATH")]
        os_release: Option<PathBuf>,
    },
    /// Verify the environment before resolving (pre-flight checks)
    Check,
}

/// Arguments for the `resolve` subcommand (also the default command).
#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// Treat an unrecognized distribution as Debian-compatible
    #[arg(long)]
    pub force: bool,

    /// Release codename to use verbatim, bypassing detection
    #[arg(long, value_name = "NAME")]
    pub codename: Option<String>,

    /// Package architecture to use, bypassing detection
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Alternate os-release file to read
    #[arg(long, value_name = "PATH")]
    pub os_release: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
