//! The build operation: options through the toolchain build phases.

use std::collections::BTreeMap;
use std::path::Path;

use crate::builder::config::ToolchainConfiguration;
use crate::builder::deps;
use crate::builder::driver;
use crate::builder::layout::Layout;
use crate::builder::toolchain::{self, Toolchain};
use crate::core::options::{BuildOptions, OptionSet};
use crate::core::platform::{BuildType, PlatformFacts};
use crate::core::recipe::Recipe;

use super::PipelineError;

/// Inputs for one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Option overrides, applied over the declared defaults.
    pub overrides: BTreeMap<String, String>,

    /// Build in release mode.
    pub release: bool,
}

/// What a completed build run resolved and produced.
#[derive(Debug)]
pub struct BuildOutcome {
    pub recipe: Recipe,
    pub options: BuildOptions,
    pub platform: PlatformFacts,
    pub layout: Layout,
}

/// Run the pipeline through the build phase with the recipe's toolchain.
pub fn run_build(project_root: &Path, request: &BuildRequest) -> Result<BuildOutcome, PipelineError> {
    let recipe = Recipe::load(project_root)?;
    let toolchain = toolchain::select(recipe.toolchain.kind);
    run_build_with(project_root, request, recipe, toolchain.as_ref())
}

/// Run the pipeline through the build phase with an explicit toolchain.
pub fn run_build_with(
    project_root: &Path,
    request: &BuildRequest,
    recipe: Recipe,
    toolchain: &dyn Toolchain,
) -> Result<BuildOutcome, PipelineError> {
    let options = OptionSet::resolve(&request.overrides)?;

    let build_type = if request.release {
        BuildType::Release
    } else {
        BuildType::Debug
    };
    // Platform facts are read once here and never re-read mid-run.
    let platform = PlatformFacts::host(build_type);

    tracing::info!(
        "building {} v{} [{}]",
        recipe.package.name,
        recipe.package.version,
        platform
    );

    let layout = Layout::resolve(project_root, &options, &platform)?;

    let config = ToolchainConfiguration::derive(&options, &platform);
    config.write_to(&layout.config_file())?;

    let descriptor = deps::emit(&options, &platform);
    deps::write_descriptor(&descriptor, &layout.deps_file())?;

    driver::drive(toolchain, &layout, &config)?;

    tracing::info!("finished {} build", platform.build_type);

    Ok(BuildOutcome {
        recipe,
        options,
        platform,
        layout,
    })
}
