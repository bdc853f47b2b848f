//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Shipwright - a packaging pipeline for native libraries
#[derive(Parser)]
#[command(name = "shipwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure and build the package
    Build(BuildArgs),

    /// Build, install, and verify the package
    Package(PackageArgs),

    /// Show the metadata consumers of this package receive
    Info(InfoArgs),

    /// Remove build and package output
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build in release mode
    #[arg(short, long)]
    pub release: bool,

    /// Override a build option (KEY=VALUE, may repeat)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct PackageArgs {
    /// Build in release mode
    #[arg(short, long)]
    pub release: bool,

    /// Override a build option (KEY=VALUE, may repeat)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Report metadata for a different OS family (e.g. windows)
    #[arg(long)]
    pub os: Option<String>,

    /// Emit JSON instead of the human-readable form
    #[arg(long)]
    pub json: bool,

    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Clean the release configuration
    #[arg(short, long)]
    pub release: bool,

    /// Option overrides identifying the configuration to clean
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Remove all configurations and the whole working directory
    #[arg(long)]
    pub all: bool,

    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
