//! Narrow interface to the external build toolchain.
//!
//! The toolchain's own working state (dependency fetching, generated
//! build rules, caches) is opaque to the pipeline; all interaction goes
//! through configure/build/install.

pub mod cmake;

use std::path::Path;

use anyhow::Result;

use crate::builder::config::ToolchainConfiguration;
use crate::builder::layout::Layout;
use crate::core::recipe::ToolchainKind;

/// Availability of the external tool.
#[derive(Debug, Clone)]
pub enum ToolchainAvailability {
    /// Tool is present and usable.
    Available {
        /// Detected version of the tool
        version: semver::Version,
    },

    /// Tool is not installed.
    NotInstalled {
        /// Name of the missing tool (e.g., "cmake")
        tool: String,
        /// Hint for how to install it
        install_hint: String,
    },

    /// Tool version is too old.
    VersionTooOld {
        found: semver::Version,
        required: semver::VersionReq,
    },
}

impl ToolchainAvailability {
    /// Check if the toolchain is usable.
    pub fn is_available(&self) -> bool {
        matches!(self, ToolchainAvailability::Available { .. })
    }

    /// Get error message if not usable.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ToolchainAvailability::Available { .. } => None,
            ToolchainAvailability::NotInstalled { tool, install_hint } => {
                Some(format!("{} not found. {}", tool, install_hint))
            }
            ToolchainAvailability::VersionTooOld { found, required } => Some(format!(
                "version {} found, but {} required",
                found, required
            )),
        }
    }
}

/// Interface to the external build toolchain.
///
/// Each operation is a blocking subprocess invocation; non-zero exit
/// surfaces the toolchain's own diagnostic text verbatim.
pub trait Toolchain: Send + Sync {
    /// Toolchain name, for selection and error messages.
    fn name(&self) -> &str;

    /// Check whether the external tool is installed and recent enough.
    ///
    /// May run processes (e.g., `cmake --version`); called lazily when
    /// the toolchain is actually needed.
    fn availability(&self) -> Result<ToolchainAvailability>;

    /// Whether the source root carries this toolchain's entry manifest.
    fn detect(&self, source_root: &Path) -> bool;

    /// Prepare build rules from the emitted configuration.
    fn configure(&self, layout: &Layout, config: &ToolchainConfiguration) -> Result<()>;

    /// Compile per the prepared rules.
    fn build(&self, layout: &Layout, config: &ToolchainConfiguration) -> Result<()>;

    /// Arrange build outputs into the install root.
    fn install(&self, layout: &Layout) -> Result<()>;
}

/// Select the toolchain implementation a recipe asks for.
pub fn select(kind: ToolchainKind) -> Box<dyn Toolchain> {
    match kind {
        ToolchainKind::Cmake => Box::new(cmake::CmakeToolchain::new()),
    }
}
