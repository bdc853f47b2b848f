//! Consumer-facing package metadata.
//!
//! `PackageInfo` is the contract downstream build pipelines consume: the
//! libraries to link, canonical names, and system libraries per platform.
//! It is computable without building the package; `ops::package` verifies
//! the described artifacts exist before handing it out for a built tree.

use serde::Serialize;
use thiserror::Error;

use crate::core::platform::{OsFamily, PlatformFacts};
use crate::core::recipe::Recipe;

/// Raised when the system-library selection has no mapping for the OS
/// family. Failing here beats silently handing consumers a POSIX link
/// line on a platform that may not have one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no system-library mapping for os family `{os}`")]
pub struct UnsupportedPlatformError {
    pub os: String,
}

/// The published package contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Library link names, in link order.
    pub libs: Vec<String>,

    /// Canonical package name.
    pub package_name: String,

    /// Canonical target name.
    pub target_name: String,

    /// Metadata-level package requirements.
    pub requires: Vec<String>,

    /// System libraries consumers must also link on this platform.
    pub system_libs: Vec<String>,
}

/// System libraries per OS family.
///
/// Total over the known families; an unmapped family is an error, not a
/// default.
pub fn system_libs(os: &OsFamily) -> Result<Vec<String>, UnsupportedPlatformError> {
    match os {
        OsFamily::Windows => Ok(vec!["ws2_32".to_string()]),
        OsFamily::Linux | OsFamily::Macos | OsFamily::Freebsd => {
            Ok(vec!["pthread".to_string()])
        }
        OsFamily::Other(name) => Err(UnsupportedPlatformError { os: name.clone() }),
    }
}

/// Publish the package metadata for a recipe on a platform.
///
/// Pure: no I/O, no dependence on a build having run. The metadata is
/// option-invariant; one contract describes the package across all
/// option combinations.
pub fn publish(
    recipe: &Recipe,
    platform: &PlatformFacts,
) -> Result<PackageInfo, UnsupportedPlatformError> {
    Ok(PackageInfo {
        libs: recipe.publish.libs.clone(),
        package_name: recipe.package_name().to_string(),
        target_name: recipe.target_name(),
        requires: recipe.publish.requires.clone(),
        system_libs: system_libs(&platform.os)?,
    })
}
