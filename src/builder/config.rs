//! Toolchain configuration derivation and emission.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::options::BuildOptions;
use crate::core::platform::PlatformFacts;

/// Variable names handed to the external toolchain.
pub const KEY_BUILD_TESTS: &str = "BUILD_TESTS";
pub const KEY_BUILD_SHARED: &str = "BUILD_SHARED";
pub const KEY_BUILD_EXECUTABLE: &str = "BUILD_EXECUTABLE";
pub const KEY_BUILD_TYPE: &str = "BUILD_TYPE";

/// I/O failure emitting the configuration file. Fatal for the
/// invocation; never retried.
#[derive(Debug, Error)]
#[error("failed to write toolchain configuration to {path}")]
pub struct ConfigurationWriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// A configuration variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Str(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Write-once key/value configuration for the external toolchain.
///
/// Entries keep declaration order; there is no mutation API after
/// derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfiguration {
    entries: Vec<(String, ConfigValue)>,
}

impl ToolchainConfiguration {
    /// Derive the configuration for one options/platform combination.
    ///
    /// Pure: identical inputs render byte-identical content. The test
    /// flag is always off; packaging never builds the project's own
    /// test targets.
    pub fn derive(options: &BuildOptions, platform: &PlatformFacts) -> ToolchainConfiguration {
        let entries = vec![
            (KEY_BUILD_TESTS.to_string(), ConfigValue::Bool(false)),
            (
                KEY_BUILD_SHARED.to_string(),
                ConfigValue::Bool(options.shared),
            ),
            (
                KEY_BUILD_EXECUTABLE.to_string(),
                ConfigValue::Bool(options.build_executable),
            ),
            (
                KEY_BUILD_TYPE.to_string(),
                ConfigValue::Str(platform.build_type.as_str().to_string()),
            ),
        ];

        ToolchainConfiguration { entries }
    }

    /// Iterate entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a variable by name.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a boolean variable by name.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(ConfigValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Render as `key = value` lines, in declaration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&value.to_string());
            out.push('\n');
        }
        out
    }

    /// Emit the rendered configuration where the toolchain will read it.
    ///
    /// The file handle lives only for this call; contents are synced
    /// before the handle is released, and any I/O failure surfaces as
    /// [`ConfigurationWriteError`].
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigurationWriteError> {
        let write = |path: &Path| -> io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut file = File::create(path)?;
            file.write_all(self.render().as_bytes())?;
            file.sync_all()?;
            Ok(())
        };

        write(path).map_err(|source| ConfigurationWriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, BuildType, CompilerFamily, OsFamily, PlatformFacts};
    use tempfile::TempDir;

    fn platform() -> PlatformFacts {
        PlatformFacts::new(
            OsFamily::Linux,
            CompilerFamily::Gcc,
            Arch::X86_64,
            BuildType::Release,
        )
    }

    #[test]
    fn test_derive_is_pure() {
        let options = BuildOptions::default();
        let a = ToolchainConfiguration::derive(&options, &platform());
        let b = ToolchainConfiguration::derive(&options, &platform());
        assert_eq!(a, b);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_tests_are_always_disabled() {
        for options in [
            BuildOptions::default(),
            BuildOptions {
                shared: true,
                build_executable: false,
            },
        ] {
            let config = ToolchainConfiguration::derive(&options, &platform());
            assert_eq!(config.get_bool(KEY_BUILD_TESTS), Some(false));
        }
    }

    #[test]
    fn test_options_are_reflected() {
        let options = BuildOptions {
            shared: true,
            build_executable: false,
        };
        let config = ToolchainConfiguration::derive(&options, &platform());

        assert_eq!(config.get_bool(KEY_BUILD_SHARED), Some(true));
        assert_eq!(config.get_bool(KEY_BUILD_EXECUTABLE), Some(false));
        assert_eq!(
            config.get(KEY_BUILD_TYPE),
            Some(&ConfigValue::Str("Release".to_string()))
        );
    }

    #[test]
    fn test_render_format() {
        let config = ToolchainConfiguration::derive(&BuildOptions::default(), &platform());
        let rendered = config.render();

        assert!(rendered.contains("BUILD_TESTS = false\n"));
        assert!(rendered.contains("BUILD_SHARED = false\n"));
        assert!(rendered.contains("BUILD_EXECUTABLE = true\n"));
        assert!(rendered.contains("BUILD_TYPE = Release\n"));
    }

    #[test]
    fn test_write_to_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build").join("cfg").join("options.cfg");

        let config = ToolchainConfiguration::derive(&BuildOptions::default(), &platform());
        config.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, config.render());
    }

    #[test]
    fn test_write_to_surfaces_io_failure() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        // Parent "directory" is a regular file; creation must fail.
        let path = blocker.join("options.cfg");
        let config = ToolchainConfiguration::derive(&BuildOptions::default(), &platform());
        let err = config.write_to(&path).unwrap_err();
        assert_eq!(err.path, path);
    }
}
