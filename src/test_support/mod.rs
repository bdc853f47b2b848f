//! Test utilities and mocks for Shipwright unit tests.
//!
//! This module is only compiled for tests. It provides a scripted
//! toolchain implementation and recipe fixtures so pipeline tests never
//! shell out to a real build tool.

use std::path::Path;

use anyhow::{bail, Result};

use crate::builder::config::ToolchainConfiguration;
use crate::builder::layout::Layout;
use crate::builder::toolchain::{Toolchain, ToolchainAvailability};
use crate::core::recipe::MANIFEST_FILE;

/// A scripted toolchain that fabricates artifacts instead of building.
pub struct MockToolchain {
    lib_names: Vec<String>,
    with_executable: bool,
    detectable: bool,
    fail_configure: bool,
    fail_build: bool,
    fail_install: bool,
}

impl MockToolchain {
    /// A toolchain producing `libship.a` and a `bin/ship` executable.
    pub fn new() -> Self {
        MockToolchain {
            lib_names: vec!["ship".to_string()],
            with_executable: true,
            detectable: true,
            fail_configure: false,
            fail_build: false,
            fail_install: false,
        }
    }

    /// Produce the given libraries on install.
    pub fn with_libs(mut self, names: &[&str]) -> Self {
        self.lib_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Skip fabricating the executable artifact.
    pub fn without_executable(mut self) -> Self {
        self.with_executable = false;
        self
    }

    /// Report the source root as not being a project of this toolchain.
    pub fn undetectable(mut self) -> Self {
        self.detectable = false;
        self
    }

    pub fn fail_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    pub fn fail_build(mut self) -> Self {
        self.fail_build = true;
        self
    }

    pub fn fail_install(mut self) -> Self {
        self.fail_install = true;
        self
    }
}

impl Default for MockToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolchain for MockToolchain {
    fn name(&self) -> &str {
        "mock"
    }

    fn availability(&self) -> Result<ToolchainAvailability> {
        Ok(ToolchainAvailability::Available {
            version: semver::Version::new(1, 0, 0),
        })
    }

    fn detect(&self, _source_root: &Path) -> bool {
        self.detectable
    }

    fn configure(&self, layout: &Layout, config: &ToolchainConfiguration) -> Result<()> {
        if self.fail_configure {
            bail!("scripted configure failure");
        }

        // The real toolchain reads the emitted configuration file; the
        // mock insists it exists and matches what it was handed.
        let emitted = std::fs::read_to_string(layout.config_file())?;
        if emitted != config.render() {
            bail!("emitted configuration does not match the derived one");
        }

        std::fs::write(layout.build_root.join("configured"), "")?;
        Ok(())
    }

    fn build(&self, layout: &Layout, _config: &ToolchainConfiguration) -> Result<()> {
        if self.fail_build {
            bail!("scripted build failure");
        }
        std::fs::write(layout.build_root.join("build.log"), "ok\n")?;
        Ok(())
    }

    fn install(&self, layout: &Layout) -> Result<()> {
        if self.fail_install {
            bail!("scripted install failure");
        }

        let lib_dir = layout.install_root.join("lib");
        std::fs::create_dir_all(&lib_dir)?;
        for name in &self.lib_names {
            std::fs::write(lib_dir.join(format!("lib{}.a", name)), "")?;
        }

        if self.with_executable {
            let bin_dir = layout.install_root.join("bin");
            std::fs::create_dir_all(&bin_dir)?;
            std::fs::write(bin_dir.join("ship"), "")?;
        }

        Ok(())
    }
}

/// Write a minimal recipe manifest into a project directory.
pub fn write_recipe(dir: &Path) {
    let manifest = r#"
        [package]
        name = "ship"
        version = "0.1.0"

        [publish]
        libs = ["ship"]
    "#;
    std::fs::write(dir.join(MANIFEST_FILE), manifest).expect("failed to write test recipe");
}
