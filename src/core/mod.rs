//! Core data model: build options, platform facts, the recipe manifest,
//! and the published package metadata.

pub mod options;
pub mod package_info;
pub mod platform;
pub mod recipe;
