//! dockstrap - Main entry point
//!
//! Resolves the Docker Engine package repository target (family, codename,
//! architecture) for the running system and reports it. The package-manager
//! layer consumes the result; dockstrap itself never touches apt sources.

mod cli;
mod codename;
mod error;
mod facts;
mod hardware;
mod logic;
mod sanity;
mod types;

use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::cli::{Cli, Commands, ResolveArgs};
use crate::codename::SystemCodenameLookup;
use crate::error::Result;
use crate::facts::OsFacts;
use crate::logic::resolver::{self, ResolveOptions};

/// Initialize tracing with appropriate settings
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            // RUST_LOG overrides the default level
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("dockstrap starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Some(Commands::Resolve(args)) => run_resolve(&args, cli.json)?,
        Some(Commands::Facts { os_release }) => run_facts(os_release.as_deref(), cli.json)?,
        Some(Commands::Check) => run_check(),
        None => {
            debug!("no command specified, resolving with defaults");
            run_resolve(&ResolveArgs::default(), cli.json)?;
        }
    }

    Ok(())
}

/// Load OS facts from an explicit path or the standard locations.
fn load_facts(os_release: Option<&Path>) -> Result<OsFacts> {
    match os_release {
        Some(path) => OsFacts::from_file(path),
        None => OsFacts::gather(),
    }
}

/// Run the full pipeline: facts, architecture, resolution, presentation.
fn run_resolve(args: &ResolveArgs, json: bool) -> Result<()> {
    let facts = load_facts(args.os_release.as_deref())?;
    info!("OS facts: {}", facts);
    if let Some(pretty) = &facts.pretty_name {
        debug!("pretty name: {}", pretty);
    }

    let arch = match &args.arch {
        Some(arch) => arch.clone(),
        None => hardware::detect_architecture()?,
    };

    let opts = ResolveOptions {
        force: args.force,
        codename_override: args.codename.clone(),
    };

    match resolver::resolve(&facts, &arch, &opts, &SystemCodenameLookup) {
        Ok(resolution) => {
            for note in &resolution.notes {
                warn!("{}", note);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                let descriptor = &resolution.descriptor;
                println!("Repository target:");
                println!("  family:       {}", descriptor.family);
                println!("  codename:     {}", descriptor.codename);
                println!("  architecture: {}", descriptor.architecture);
                println!("  codename via: {}", resolution.codename_source);
                for note in &resolution.notes {
                    println!("  warning:      {}", note);
                }
            }
            Ok(())
        }
        Err(e) => {
            // Never hand a partial descriptor to the install layer
            error!("resolution failed: {}", e);
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the detected OS facts.
fn run_facts(os_release: Option<&Path>, json: bool) -> Result<()> {
    let facts = load_facts(os_release)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&facts)?);
    } else {
        println!("OS identification facts:");
        let id = if facts.id.is_empty() { "(none)" } else { facts.id.as_str() };
        println!("  id:          {}", id);
        println!("  id_like:     [{}]", facts.id_like.join(", "));
        println!(
            "  codename:    {}",
            facts.version_codename.as_deref().unwrap_or("(none)")
        );
        println!(
            "  pretty name: {}",
            facts.pretty_name.as_deref().unwrap_or("(none)")
        );
    }
    Ok(())
}

/// Run pre-flight checks and report. Exits non-zero only when resolution
/// would be impossible.
fn run_check() {
    let report = sanity::verify_environment();

    match report.facts_source {
        Some(path) => println!("✓ OS facts source: {}", path),
        None => println!("✗ no os-release file found"),
    }

    for binary in &report.missing_binaries {
        println!("! detection helper missing: {} (detection quality degraded)", binary);
    }
    if report.missing_binaries.is_empty() {
        println!("✓ detection helpers present");
    }

    if report.is_root {
        println!("✓ running as root (required later for installation, not for resolving)");
    } else {
        println!("! not running as root (fine for resolving)");
    }

    if !report.is_ok() {
        error!("pre-flight checks failed: no OS facts source");
        std::process::exit(1);
    }
    info!("pre-flight checks passed");
}
