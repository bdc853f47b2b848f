//! Command implementations

pub mod build;
pub mod clean;
pub mod completions;
pub mod info;
pub mod package;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use shipwright::core::options::parse_override_args;

/// Resolve the project root from a `--path` flag or the current directory.
pub fn project_root(path: &Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Parse `-o KEY=VALUE` flags into an override mapping.
pub fn parse_overrides(args: &[String]) -> Result<BTreeMap<String, String>> {
    Ok(parse_override_args(args)?)
}
