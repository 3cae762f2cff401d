//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// mobile-doctor - Check a machine for Android and iOS build tooling.
#[derive(Debug, Parser)]
#[command(name = "mobile-doctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.mobile-doctor/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Re-run every probe instead of reusing results
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report missing or outdated tooling (default if no command specified)
    Doctor(DoctorArgs),

    /// Show detected tool versions
    Info(InfoArgs),

    /// Check whether a platform can be built locally
    CanBuild(CanBuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `doctor` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DoctorArgs {
    /// Print warnings as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InfoArgs {
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `can-build` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CanBuildArgs {
    /// Platform to check (android or ios)
    pub platform: String,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
