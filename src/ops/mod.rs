//! High-level pipeline operations invoked by CLI commands.

pub mod build;
pub mod package;

use thiserror::Error;

use crate::builder::config::ConfigurationWriteError;
use crate::builder::driver::BuildError;
use crate::builder::install::InstallError;
use crate::builder::layout::LayoutError;
use crate::core::options::InvalidOptionError;
use crate::core::package_info::UnsupportedPlatformError;

pub use build::{run_build, run_build_with, BuildOutcome, BuildRequest};
pub use package::{run_package, run_package_with, PackageOutcome};

/// Terminal pipeline failure, naming the failing stage.
///
/// Every stage failure aborts the whole pipeline; there is no partial
/// resume and no automatic retry anywhere.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid option override")]
    InvalidOption(#[from] InvalidOptionError),

    #[error("layout resolution failed")]
    Layout(#[from] LayoutError),

    #[error("configuration emit failed")]
    ConfigurationWrite(#[from] ConfigurationWriteError),

    #[error("build failed")]
    Build(#[from] BuildError),

    #[error("packaging failed")]
    Install(#[from] InstallError),

    #[error("platform not supported")]
    UnsupportedPlatform(#[from] UnsupportedPlatformError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
