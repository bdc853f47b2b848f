//! CMake implementation of the toolchain interface.

use std::path::Path;

use anyhow::{bail, Result};

use crate::builder::config::{ConfigValue, ToolchainConfiguration, KEY_BUILD_TYPE};
use crate::builder::layout::Layout;
use crate::builder::toolchain::{Toolchain, ToolchainAvailability};
use crate::util::process::{
    detect_tool_version, find_executable, parse_version_flexible, ProcessBuilder,
};

const TOOL: &str = "cmake";
const VERSION_REQ: &str = ">=3.16";

/// CMake-driven external toolchain.
pub struct CmakeToolchain {
    cached_availability: std::sync::OnceLock<ToolchainAvailability>,
}

impl CmakeToolchain {
    pub fn new() -> Self {
        CmakeToolchain {
            cached_availability: std::sync::OnceLock::new(),
        }
    }

    /// Detect the installed CMake version.
    fn detect_version() -> Result<semver::Version> {
        detect_tool_version(TOOL, |stdout| {
            // Parse "cmake version 3.20.5"
            for line in stdout.lines() {
                if let Some(rest) = line.strip_prefix("cmake version ") {
                    return parse_version_flexible(rest);
                }
            }
            None
        })
    }

    fn probe_availability() -> ToolchainAvailability {
        if find_executable(TOOL).is_none() {
            return ToolchainAvailability::NotInstalled {
                tool: TOOL.to_string(),
                install_hint: install_hint(),
            };
        }

        match Self::detect_version() {
            Ok(version) => match VERSION_REQ.parse::<semver::VersionReq>() {
                Ok(req) if !req.matches(&version) => ToolchainAvailability::VersionTooOld {
                    found: version,
                    required: req,
                },
                _ => ToolchainAvailability::Available { version },
            },
            Err(_) => ToolchainAvailability::NotInstalled {
                tool: TOOL.to_string(),
                install_hint: install_hint(),
            },
        }
    }

    /// Arguments for the configure invocation.
    fn configure_args(&self, layout: &Layout, config: &ToolchainConfiguration) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            layout.source_root.display().to_string(),
            "-B".to_string(),
            layout.build_root.display().to_string(),
        ];

        args.push(format!(
            "-DCMAKE_INSTALL_PREFIX={}",
            layout.install_root.display()
        ));

        for (key, value) in config.entries() {
            let cmake_value = match value {
                ConfigValue::Bool(true) => "ON".to_string(),
                ConfigValue::Bool(false) => "OFF".to_string(),
                ConfigValue::Str(s) => s.clone(),
            };

            if key == KEY_BUILD_TYPE {
                args.push(format!("-DCMAKE_BUILD_TYPE={}", cmake_value));
            } else {
                args.push(format!("-D{}={}", key, cmake_value));
            }
        }

        args
    }

    fn build_type<'a>(config: &'a ToolchainConfiguration) -> Option<&'a str> {
        match config.get(KEY_BUILD_TYPE) {
            Some(ConfigValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Default for CmakeToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolchain for CmakeToolchain {
    fn name(&self) -> &str {
        TOOL
    }

    fn availability(&self) -> Result<ToolchainAvailability> {
        Ok(self
            .cached_availability
            .get_or_init(Self::probe_availability)
            .clone())
    }

    fn detect(&self, source_root: &Path) -> bool {
        source_root.join("CMakeLists.txt").exists()
    }

    fn configure(&self, layout: &Layout, config: &ToolchainConfiguration) -> Result<()> {
        let args = self.configure_args(layout, config);
        tracing::debug!("cmake configure: cmake {}", args.join(" "));

        let output = ProcessBuilder::new(TOOL)
            .args(&args)
            .cwd(&layout.source_root)
            .exec()?;

        if !output.status.success() {
            bail!(
                "cmake configure failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }

    fn build(&self, layout: &Layout, config: &ToolchainConfiguration) -> Result<()> {
        let mut cmd = ProcessBuilder::new(TOOL)
            .arg("--build")
            .arg(&layout.build_root)
            .arg("--parallel");

        // Multi-config generators need --config
        if let Some(build_type) = Self::build_type(config) {
            cmd = cmd.arg("--config").arg(build_type);
        }

        tracing::debug!("cmake build: {}", cmd.display_command());

        let output = cmd.exec()?;

        if !output.status.success() {
            bail!(
                "cmake build failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }

    fn install(&self, layout: &Layout) -> Result<()> {
        let cmd = ProcessBuilder::new(TOOL)
            .arg("--install")
            .arg(&layout.build_root)
            .arg("--prefix")
            .arg(&layout.install_root);

        tracing::debug!("cmake install: {}", cmd.display_command());

        let output = cmd.exec()?;

        if !output.status.success() {
            bail!(
                "cmake install failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }
}

/// Platform-specific CMake install hint.
fn install_hint() -> String {
    #[cfg(target_os = "linux")]
    {
        "Install CMake: apt install cmake, dnf install cmake, or https://cmake.org/download/"
            .to_string()
    }
    #[cfg(target_os = "macos")]
    {
        "Install CMake: brew install cmake or https://cmake.org/download/".to_string()
    }
    #[cfg(target_os = "windows")]
    {
        "Install CMake: winget install cmake or https://cmake.org/download/".to_string()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        "Install CMake from https://cmake.org/download/".to_string()
    }
}
