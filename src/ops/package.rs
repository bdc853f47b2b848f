//! The package operation: full pipeline through install, verification,
//! and metadata publication.

use std::path::Path;

use crate::builder::install;
use crate::builder::layout::Layout;
use crate::builder::toolchain::{self, Toolchain};
use crate::core::package_info::{self, PackageInfo};
use crate::core::recipe::Recipe;

use super::build::{run_build_with, BuildRequest};
use super::PipelineError;

/// A packaged tree plus the metadata describing it.
#[derive(Debug)]
pub struct PackageOutcome {
    pub info: PackageInfo,
    pub layout: Layout,
}

/// Run the full pipeline with the recipe's toolchain.
pub fn run_package(
    project_root: &Path,
    request: &BuildRequest,
) -> Result<PackageOutcome, PipelineError> {
    let recipe = Recipe::load(project_root)?;
    let toolchain = toolchain::select(recipe.toolchain.kind);
    run_package_with(project_root, request, recipe, toolchain.as_ref())
}

/// Run the full pipeline with an explicit toolchain.
pub fn run_package_with(
    project_root: &Path,
    request: &BuildRequest,
    recipe: Recipe,
    toolchain: &dyn Toolchain,
) -> Result<PackageOutcome, PipelineError> {
    let outcome = run_build_with(project_root, request, recipe, toolchain)?;

    install::install(toolchain, &outcome.layout, &outcome.options)?;

    // Publish only a contract the install tree can actually honor.
    let info = package_info::publish(&outcome.recipe, &outcome.platform)?;
    install::verify(&outcome.layout.install_root, &info)?;

    tracing::info!(
        "packaged {} v{} at {}",
        outcome.recipe.package.name,
        outcome.recipe.package.version,
        outcome.layout.install_root.display()
    );

    Ok(PackageOutcome {
        info,
        layout: outcome.layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_recipe, MockToolchain};
    use tempfile::TempDir;

    fn load_recipe(root: &Path) -> Recipe {
        Recipe::load(root).unwrap()
    }

    #[test]
    fn test_package_end_to_end() {
        let tmp = TempDir::new().unwrap();
        write_recipe(tmp.path());
        let recipe = load_recipe(tmp.path());

        let outcome = run_package_with(
            tmp.path(),
            &BuildRequest::default(),
            recipe,
            &MockToolchain::new(),
        )
        .unwrap();

        assert_eq!(outcome.info.libs, vec!["ship"]);
        assert_eq!(outcome.info.package_name, "ship");
        assert!(outcome
            .layout
            .install_root
            .join("lib")
            .join("libship.a")
            .exists());
    }

    #[test]
    fn test_package_fails_when_toolchain_install_fails() {
        let tmp = TempDir::new().unwrap();
        write_recipe(tmp.path());
        let recipe = load_recipe(tmp.path());

        let err = run_package_with(
            tmp.path(),
            &BuildRequest::default(),
            recipe,
            &MockToolchain::new().fail_install(),
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Install(_)));
    }

    #[test]
    fn test_package_fails_verification_for_undeclared_artifacts() {
        let tmp = TempDir::new().unwrap();
        write_recipe(tmp.path());
        let recipe = load_recipe(tmp.path());

        // The toolchain produces a library, but not the one the recipe
        // declares to consumers.
        let err = run_package_with(
            tmp.path(),
            &BuildRequest::default(),
            recipe,
            &MockToolchain::new().with_libs(&["dinghy"]),
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Install(_)));
        let text = format!("{:#}", anyhow::Error::from(err));
        assert!(text.contains("ship"));
    }
}
