//! Two-phase build driver over the toolchain interface.

use std::fmt;

use thiserror::Error;

use crate::builder::config::ToolchainConfiguration;
use crate::builder::layout::Layout;
use crate::builder::toolchain::Toolchain;

/// The phase an external invocation failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Configure,
    Compile,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildPhase::Configure => write!(f, "configure"),
            BuildPhase::Compile => write!(f, "build"),
        }
    }
}

/// External toolchain failure. Fatal: repeating an identical invocation
/// cannot change the outcome, so nothing here retries.
#[derive(Debug, Error)]
#[error("{phase} phase failed")]
pub struct BuildError {
    pub phase: BuildPhase,
    #[source]
    pub source: anyhow::Error,
}

impl BuildError {
    fn configure(source: anyhow::Error) -> Self {
        BuildError {
            phase: BuildPhase::Configure,
            source,
        }
    }
}

/// Drive the toolchain's configure and build phases.
///
/// Each phase blocks until the external invocation returns; a failure
/// in either aborts immediately with no partial-success state.
pub fn drive(
    toolchain: &dyn Toolchain,
    layout: &Layout,
    config: &ToolchainConfiguration,
) -> Result<(), BuildError> {
    let availability = toolchain.availability().map_err(BuildError::configure)?;
    if let Some(message) = availability.error_message() {
        return Err(BuildError::configure(anyhow::anyhow!(message)));
    }

    if !toolchain.detect(&layout.source_root) {
        return Err(BuildError::configure(anyhow::anyhow!(
            "source root {} does not contain a {} project",
            layout.source_root.display(),
            toolchain.name()
        )));
    }

    tracing::info!("configuring with {}", toolchain.name());
    toolchain
        .configure(layout, config)
        .map_err(BuildError::configure)?;

    tracing::info!("building {}", layout.build_root.display());
    toolchain.build(layout, config).map_err(|source| BuildError {
        phase: BuildPhase::Compile,
        source,
    })?;

    Ok(())
}
