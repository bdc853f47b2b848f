//! Shipwright.toml recipe manifest parsing and schema.
//!
//! The recipe declares the package identity and the names consumers use
//! to link against the packaged artifacts. Build options are not part of
//! the manifest; they are a fixed surface resolved per invocation.

use std::path::Path;

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::util::fs::read_to_string;

/// Canonical manifest file name.
pub const MANIFEST_FILE: &str = "Shipwright.toml";

/// The parsed Shipwright.toml recipe.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    pub package: PackageSection,
    pub publish: PublishSection,

    #[serde(default)]
    pub toolchain: ToolchainSection,
}

/// `[package]` - package identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub name: String,
    pub version: Version,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,
}

/// `[publish]` - the names consumers see.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishSection {
    /// Library link names, in link order.
    pub libs: Vec<String>,

    /// Canonical package name; defaults to the package name.
    #[serde(default)]
    pub package_name: Option<String>,

    /// Canonical target name; defaults to `<package_name>::<package_name>`.
    #[serde(default)]
    pub target_name: Option<String>,

    /// Metadata-level package requirements.
    #[serde(default)]
    pub requires: Vec<String>,
}

/// `[toolchain]` - which external toolchain drives the build.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSection {
    #[serde(default)]
    pub kind: ToolchainKind,
}

/// Supported external toolchains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainKind {
    #[default]
    Cmake,
}

impl Recipe {
    /// Load and validate the recipe from a project root.
    pub fn load(project_root: &Path) -> Result<Recipe> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.exists() {
            bail!(
                "no {} found in {}",
                MANIFEST_FILE,
                project_root.display()
            );
        }

        let text = read_to_string(&path)?;
        let recipe: Recipe = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        recipe.validate()?;

        Ok(recipe)
    }

    fn validate(&self) -> Result<()> {
        if self.package.name.is_empty() {
            bail!("package name must not be empty");
        }
        if self.publish.libs.is_empty() {
            bail!("publish.libs must declare at least one library");
        }
        if self.publish.libs.iter().any(|lib| lib.is_empty()) {
            bail!("publish.libs entries must not be empty");
        }
        Ok(())
    }

    /// Canonical package name consumers reference.
    pub fn package_name(&self) -> &str {
        self.publish
            .package_name
            .as_deref()
            .unwrap_or(&self.package.name)
    }

    /// Canonical target name consumers reference.
    pub fn target_name(&self) -> String {
        self.publish
            .target_name
            .clone()
            .unwrap_or_else(|| format!("{0}::{0}", self.package_name()))
    }
}
