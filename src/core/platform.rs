//! Host platform facts: OS family, compiler identity, architecture, and
//! build type.
//!
//! Facts are read once at pipeline start and treated as immutable for the
//! rest of the run.

use std::fmt;
use std::path::Path;

/// Operating system family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    Macos,
    Windows,
    Freebsd,
    /// A family this pipeline has no specific knowledge of; carried
    /// verbatim so later stages can reject it explicitly.
    Other(String),
}

impl OsFamily {
    /// Detect the host OS family.
    pub fn host() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Parse an OS family name. Unrecognized names are preserved as
    /// [`OsFamily::Other`] rather than rejected here.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "linux" => OsFamily::Linux,
            "macos" | "darwin" => OsFamily::Macos,
            "windows" => OsFamily::Windows,
            "freebsd" => OsFamily::Freebsd,
            other => OsFamily::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Macos => "macos",
            OsFamily::Windows => "windows",
            OsFamily::Freebsd => "freebsd",
            OsFamily::Other(name) => name,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiler family driving the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerFamily {
    Gcc,
    Clang,
    Msvc,
    Other(String),
}

impl CompilerFamily {
    /// Detect the compiler family from the CC environment variable,
    /// falling back to the conventional default for the OS.
    pub fn detect(os: &OsFamily) -> Self {
        if let Ok(cc) = std::env::var("CC") {
            return Self::from_cc(&cc);
        }

        match os {
            OsFamily::Windows => CompilerFamily::Msvc,
            _ => CompilerFamily::Gcc,
        }
    }

    /// Classify a CC value by its executable name.
    pub fn from_cc(cc: &str) -> Self {
        let file_name = Path::new(cc)
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if file_name.contains("clang") {
            CompilerFamily::Clang
        } else if file_name.contains("gcc") || file_name == "cc" {
            CompilerFamily::Gcc
        } else if file_name == "cl" || file_name == "cl.exe" {
            CompilerFamily::Msvc
        } else {
            CompilerFamily::Other(file_name)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Other(name) => name,
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
    Other(String),
}

impl Arch {
    /// Detect the host architecture.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => Arch::X86_64,
            "aarch64" => Arch::Aarch64,
            other => Arch::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Other(name) => name,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build type handed to the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform facts for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFacts {
    pub os: OsFamily,
    pub compiler: CompilerFamily,
    pub arch: Arch,
    pub build_type: BuildType,
}

impl PlatformFacts {
    /// Read the host platform facts, once, for a run with the given
    /// build type.
    pub fn host(build_type: BuildType) -> Self {
        let os = OsFamily::host();
        let compiler = CompilerFamily::detect(&os);
        PlatformFacts {
            compiler,
            arch: Arch::host(),
            build_type,
            os,
        }
    }

    /// Construct explicit platform facts.
    pub fn new(os: OsFamily, compiler: CompilerFamily, arch: Arch, build_type: BuildType) -> Self {
        PlatformFacts {
            os,
            compiler,
            arch,
            build_type,
        }
    }

    /// Replace the OS family, keeping the other facts.
    pub fn with_os(mut self, os: OsFamily) -> Self {
        self.os = os;
        self
    }
}

impl fmt::Display for PlatformFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.os, self.compiler, self.arch, self.build_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_parse_known_families() {
        assert_eq!(OsFamily::parse("linux"), OsFamily::Linux);
        assert_eq!(OsFamily::parse("darwin"), OsFamily::Macos);
        assert_eq!(OsFamily::parse("macos"), OsFamily::Macos);
        assert_eq!(OsFamily::parse("Windows"), OsFamily::Windows);
        assert_eq!(OsFamily::parse("freebsd"), OsFamily::Freebsd);
    }

    #[test]
    fn test_os_parse_preserves_unknown() {
        assert_eq!(
            OsFamily::parse("plan9"),
            OsFamily::Other("plan9".to_string())
        );
    }

    #[test]
    fn test_compiler_from_cc() {
        assert_eq!(CompilerFamily::from_cc("clang-18"), CompilerFamily::Clang);
        assert_eq!(
            CompilerFamily::from_cc("/usr/bin/gcc-13"),
            CompilerFamily::Gcc
        );
        assert_eq!(CompilerFamily::from_cc("cc"), CompilerFamily::Gcc);
        assert_eq!(CompilerFamily::from_cc("cl.exe"), CompilerFamily::Msvc);
        assert_eq!(
            CompilerFamily::from_cc("tcc"),
            CompilerFamily::Other("tcc".to_string())
        );
    }

    #[test]
    fn test_platform_display() {
        let facts = PlatformFacts::new(
            OsFamily::Linux,
            CompilerFamily::Gcc,
            Arch::X86_64,
            BuildType::Release,
        );
        assert_eq!(facts.to_string(), "linux-gcc-x86_64-Release");
    }
}
