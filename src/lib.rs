//! Shipwright - a packaging pipeline for native libraries
//!
//! This crate turns a small set of build options into a reproducible
//! external-toolchain invocation, drives configure/build/install, and
//! publishes the resulting package's consumable metadata.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Shipwright unit tests.
///
/// Only available when running tests; provides a scripted toolchain so
/// pipeline tests never shell out to a real build tool.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    options::{BuildOptions, OptionSet},
    package_info::PackageInfo,
    platform::PlatformFacts,
    recipe::Recipe,
};

pub use crate::builder::layout::Layout;
