//! Build option declarations and resolution.
//!
//! The option surface is fixed and enumerable: every option carries a
//! declared value domain and a default. Resolution applies overrides on
//! top of the defaults and rejects anything outside the declaration.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Name of the shared-library option.
pub const OPTION_SHARED: &str = "shared";

/// Name of the standalone-executable option.
pub const OPTION_BUILD_EXECUTABLE: &str = "build_executable";

const DEFAULT_SHARED: bool = false;
const DEFAULT_BUILD_EXECUTABLE: bool = true;

/// Value domains an option can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDomain {
    Bool,
}

impl OptionDomain {
    fn expected(&self) -> &'static str {
        match self {
            OptionDomain::Bool => "`true` or `false`",
        }
    }
}

/// A resolved option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
}

impl OptionValue {
    pub fn as_bool(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A declared option: name, value domain, and default.
#[derive(Debug, Clone, Copy)]
pub struct OptionDecl {
    pub name: &'static str,
    pub domain: OptionDomain,
    pub default: OptionValue,
}

const DECLARATIONS: &[OptionDecl] = &[
    OptionDecl {
        name: OPTION_SHARED,
        domain: OptionDomain::Bool,
        default: OptionValue::Bool(DEFAULT_SHARED),
    },
    OptionDecl {
        name: OPTION_BUILD_EXECUTABLE,
        domain: OptionDomain::Bool,
        default: OptionValue::Bool(DEFAULT_BUILD_EXECUTABLE),
    },
];

/// Error raised for an override outside the declared option surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOptionError {
    #[error("unknown build option `{name}` (known options: {known})")]
    UnknownOption { name: String, known: String },

    #[error("invalid value `{value}` for build option `{name}`: expected {expected}")]
    OutOfDomain {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("malformed option override `{arg}`: expected KEY=VALUE")]
    Malformed { arg: String },
}

/// The fixed set of options this recipe exposes.
pub struct OptionSet;

impl OptionSet {
    /// The declared options, in a stable order.
    pub fn declarations() -> &'static [OptionDecl] {
        DECLARATIONS
    }

    /// Resolve a partial override mapping into full [`BuildOptions`].
    ///
    /// Options absent from `overrides` take their declared default.
    /// Resolution has no side effects and is idempotent for identical
    /// inputs.
    pub fn resolve(
        overrides: &BTreeMap<String, String>,
    ) -> Result<BuildOptions, InvalidOptionError> {
        let mut resolved: BTreeMap<&'static str, OptionValue> = DECLARATIONS
            .iter()
            .map(|decl| (decl.name, decl.default))
            .collect();

        for (name, raw) in overrides {
            let decl = DECLARATIONS
                .iter()
                .find(|decl| decl.name == name.as_str())
                .ok_or_else(|| InvalidOptionError::UnknownOption {
                    name: name.clone(),
                    known: DECLARATIONS
                        .iter()
                        .map(|d| d.name)
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;

            resolved.insert(decl.name, parse_value(decl, raw)?);
        }

        Ok(BuildOptions {
            shared: resolved[OPTION_SHARED].as_bool(),
            build_executable: resolved[OPTION_BUILD_EXECUTABLE].as_bool(),
        })
    }
}

fn parse_value(decl: &OptionDecl, raw: &str) -> Result<OptionValue, InvalidOptionError> {
    match decl.domain {
        OptionDomain::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(OptionValue::Bool(true)),
            "false" => Ok(OptionValue::Bool(false)),
            _ => Err(InvalidOptionError::OutOfDomain {
                name: decl.name.to_string(),
                value: raw.to_string(),
                expected: decl.domain.expected(),
            }),
        },
    }
}

/// Parse `KEY=VALUE` override arguments into an override mapping.
///
/// A repeated key keeps the last value, matching how later command-line
/// flags win.
pub fn parse_override_args(args: &[String]) -> Result<BTreeMap<String, String>, InvalidOptionError> {
    let mut overrides = BTreeMap::new();

    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(InvalidOptionError::Malformed { arg: arg.clone() });
        };
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(overrides)
}

/// Fully resolved options for one pipeline invocation.
///
/// Immutable once resolved; the pipeline passes it by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build a shared library instead of a static one.
    pub shared: bool,

    /// Build a standalone executable target in addition to the library.
    pub build_executable: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            shared: DEFAULT_SHARED,
            build_executable: DEFAULT_BUILD_EXECUTABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let opts = OptionSet::resolve(&BTreeMap::new()).unwrap();
        assert!(!opts.shared);
        assert!(opts.build_executable);
        assert_eq!(opts, BuildOptions::default());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let ov = overrides(&[("shared", "true")]);
        let first = OptionSet::resolve(&ov).unwrap();
        let second = OptionSet::resolve(&ov).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overrides_apply() {
        let opts =
            OptionSet::resolve(&overrides(&[("shared", "true"), ("build_executable", "false")]))
                .unwrap();
        assert!(opts.shared);
        assert!(!opts.build_executable);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = OptionSet::resolve(&overrides(&[("lto", "true")])).unwrap_err();
        assert!(matches!(err, InvalidOptionError::UnknownOption { .. }));
        assert!(err.to_string().contains("lto"));
        assert!(err.to_string().contains("shared"));
    }

    #[test]
    fn test_non_boolean_value_rejected() {
        let err = OptionSet::resolve(&overrides(&[("shared", "yes")])).unwrap_err();
        assert!(matches!(err, InvalidOptionError::OutOfDomain { .. }));
        assert!(err.to_string().contains("yes"));
    }

    #[test]
    fn test_boolean_parsing_is_case_insensitive() {
        let opts = OptionSet::resolve(&overrides(&[("shared", "True")])).unwrap();
        assert!(opts.shared);
    }

    #[test]
    fn test_parse_override_args() {
        let args = vec!["shared=true".to_string(), "build_executable=false".to_string()];
        let parsed = parse_override_args(&args).unwrap();
        assert_eq!(parsed["shared"], "true");
        assert_eq!(parsed["build_executable"], "false");
    }

    #[test]
    fn test_parse_override_args_rejects_missing_equals() {
        let err = parse_override_args(&["shared".to_string()]).unwrap_err();
        assert!(matches!(err, InvalidOptionError::Malformed { .. }));
    }
}
