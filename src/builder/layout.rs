//! Directory layout resolution for one build configuration.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::options::BuildOptions;
use crate::core::platform::PlatformFacts;
use crate::util::hash::Fingerprint;

/// Working directory created under the project root.
pub const WORK_DIR: &str = ".shipwright";

const CONFIG_FILE: &str = "toolchain-options.cfg";
const DEPS_FILE: &str = "dependencies.json";

/// Error resolving the project layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("project root does not exist: {0}")]
    Missing(PathBuf),

    #[error("project root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("project root is not readable: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolved directory layout for one options/platform combination.
///
/// Build and install roots are namespaced by a fingerprint of the
/// options and platform, so two configurations never share outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    pub build_root: PathBuf,
    pub install_root: PathBuf,
}

impl Layout {
    /// Resolve the layout for a project root.
    ///
    /// Deterministic for identical inputs. Fails if the project root is
    /// missing, not a directory, or unreadable. No directories are
    /// created here.
    pub fn resolve(
        project_root: &Path,
        options: &BuildOptions,
        platform: &PlatformFacts,
    ) -> Result<Layout, LayoutError> {
        let meta = std::fs::metadata(project_root).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LayoutError::Missing(project_root.to_path_buf())
            } else {
                LayoutError::Unreadable {
                    path: project_root.to_path_buf(),
                    source,
                }
            }
        })?;
        if !meta.is_dir() {
            return Err(LayoutError::NotADirectory(project_root.to_path_buf()));
        }

        // Canonicalize so relative and absolute spellings of the same
        // root resolve to the same layout; doubles as a readability probe.
        let project_root =
            std::fs::canonicalize(project_root).map_err(|source| LayoutError::Unreadable {
                path: project_root.to_path_buf(),
                source,
            })?;
        std::fs::read_dir(&project_root).map_err(|source| LayoutError::Unreadable {
            path: project_root.clone(),
            source,
        })?;

        let tag = config_tag(options, platform);
        let work = project_root.join(WORK_DIR);

        Ok(Layout {
            source_root: project_root.clone(),
            build_root: work.join("build").join(&tag),
            install_root: work.join("package").join(&tag),
            project_root,
        })
    }

    /// The working directory holding all build and package output.
    pub fn work_dir(&self) -> PathBuf {
        self.project_root.join(WORK_DIR)
    }

    /// Where the toolchain configuration file is emitted.
    pub fn config_file(&self) -> PathBuf {
        self.build_root.join(CONFIG_FILE)
    }

    /// Where the dependency descriptor file is emitted.
    pub fn deps_file(&self) -> PathBuf {
        self.build_root.join(DEPS_FILE)
    }
}

/// Short tag namespacing build output by options + platform.
fn config_tag(options: &BuildOptions, platform: &PlatformFacts) -> String {
    let mut fp = Fingerprint::new();
    fp.update_bool(options.shared)
        .update_bool(options.build_executable)
        .update_str(platform.os.as_str())
        .update_str(platform.compiler.as_str())
        .update_str(platform.arch.as_str())
        .update_str(platform.build_type.as_str());
    fp.finish_short()
}
