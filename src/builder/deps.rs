//! Dependency descriptors for the external toolchain.
//!
//! This recipe carries no external requirements: the toolchain fetches
//! what it needs itself. The descriptor file must still exist, empty,
//! because later toolchain steps refuse to run without it.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::config::ConfigurationWriteError;
use crate::core::options::BuildOptions;
use crate::core::platform::PlatformFacts;

/// One external dependency reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_req: Option<String>,
}

/// Machine-readable descriptor of build/link-time dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDescriptor {
    #[serde(default)]
    pub requires: Vec<DependencyRef>,
}

impl DependencyDescriptor {
    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
    }
}

/// Emit the dependency descriptor for one options/platform combination.
pub fn emit(_options: &BuildOptions, _platform: &PlatformFacts) -> DependencyDescriptor {
    DependencyDescriptor::default()
}

/// Write the descriptor file. A missing file, not an empty one, is what
/// breaks downstream toolchain steps.
pub fn write_descriptor(
    descriptor: &DependencyDescriptor,
    path: &Path,
) -> Result<(), ConfigurationWriteError> {
    let write = |path: &Path| -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(descriptor).map_err(io::Error::other)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    };

    write(path).map_err(|source| ConfigurationWriteError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, BuildType, CompilerFamily, OsFamily};
    use tempfile::TempDir;

    #[test]
    fn test_emit_is_empty() {
        let platform = PlatformFacts::new(
            OsFamily::Linux,
            CompilerFamily::Gcc,
            Arch::X86_64,
            BuildType::Debug,
        );
        let descriptor = emit(&BuildOptions::default(), &platform);
        assert!(descriptor.is_empty());
    }

    #[test]
    fn test_empty_descriptor_still_writes_a_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build").join("dependencies.json");

        write_descriptor(&DependencyDescriptor::default(), &path).unwrap();
        assert!(path.exists());

        let parsed: DependencyDescriptor =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_descriptor_round_trips() {
        let descriptor = DependencyDescriptor {
            requires: vec![DependencyRef {
                name: "zlib".to_string(),
                version_req: Some(">=1.3".to_string()),
            }],
        };

        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: DependencyDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
