//! Install step and package verification.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::builder::layout::Layout;
use crate::builder::toolchain::Toolchain;
use crate::core::options::BuildOptions;
use crate::core::package_info::PackageInfo;

const LIB_EXTENSIONS: &[&str] = &["a", "so", "dylib", "lib", "dll"];

/// Install failure: the toolchain step itself, or an install tree
/// inconsistent with the options the build was configured with.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("install step failed")]
    Toolchain {
        #[source]
        source: anyhow::Error,
    },

    #[error("no executable artifact found under {install_root}")]
    MissingExecutable { install_root: PathBuf },

    #[error("no library artifact found under {install_root}")]
    MissingLibrary { install_root: PathBuf },

    #[error("declared library `{name}` was not produced under {install_root}")]
    MissingDeclaredLibrary { name: String, install_root: PathBuf },
}

/// Run the toolchain install step, then check the install tree against
/// the options the build was configured with.
pub fn install(
    toolchain: &dyn Toolchain,
    layout: &Layout,
    options: &BuildOptions,
) -> Result<(), InstallError> {
    if has_build_outputs(&layout.build_root) {
        toolchain
            .install(layout)
            .map_err(|source| InstallError::Toolchain { source })?;
    }

    check_artifacts(&layout.install_root, options)
}

/// Assert every library the metadata declares actually exists on disk.
///
/// Run before the metadata is handed out as describing a built package;
/// otherwise the contract could name artifacts that were never produced.
pub fn verify(install_root: &Path, info: &PackageInfo) -> Result<(), InstallError> {
    for name in &info.libs {
        if !library_present(install_root, name) {
            return Err(InstallError::MissingDeclaredLibrary {
                name: name.clone(),
                install_root: install_root.to_path_buf(),
            });
        }
    }
    Ok(())
}

fn has_build_outputs(build_root: &Path) -> bool {
    std::fs::read_dir(build_root)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn check_artifacts(install_root: &Path, options: &BuildOptions) -> Result<(), InstallError> {
    let mut has_library = false;
    let mut has_executable = false;

    for entry in WalkDir::new(install_root).into_iter().flatten() {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if is_library(path) {
            has_library = true;
        } else if is_executable(path) {
            has_executable = true;
        }
    }

    if options.build_executable && !has_executable {
        return Err(InstallError::MissingExecutable {
            install_root: install_root.to_path_buf(),
        });
    }
    if !has_library {
        return Err(InstallError::MissingLibrary {
            install_root: install_root.to_path_buf(),
        });
    }

    Ok(())
}

fn is_library(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            LIB_EXTENSIONS.contains(&ext)
                // Versioned shared objects: libfoo.so.1.2.3
                || path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.contains(".so."))
        }
        None => false,
    }
}

fn is_executable(path: &Path) -> bool {
    if path.extension().and_then(|e| e.to_str()) == Some("exe") {
        return true;
    }
    path.parent()
        .and_then(|p| p.file_name())
        .is_some_and(|dir| dir == "bin")
}

fn library_present(install_root: &Path, name: &str) -> bool {
    WalkDir::new(install_root)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_library(entry.path()))
        .any(|entry| extract_lib_name(entry.path()).as_deref() == Some(name))
}

/// Extract a library name from a file path, across platform naming
/// conventions: `libfoo.a` -> `foo`, `libfoo.so.1.2` -> `foo`,
/// `foo.lib` -> `foo`.
fn extract_lib_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();

    let name = stem
        .strip_prefix("lib")
        .map(|s| s.to_string())
        .unwrap_or_else(|| stem.to_string());

    // Remove version suffixes (e.g., libfoo.so.1.2.3 -> foo)
    let name = name.split('.').next().unwrap_or(&name).to_string();

    Some(name)
}
