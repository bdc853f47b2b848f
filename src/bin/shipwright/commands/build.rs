//! `shipwright build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use shipwright::ops::{run_build, BuildRequest};

pub fn execute(args: BuildArgs) -> Result<()> {
    let root = super::project_root(&args.path)?;

    let request = BuildRequest {
        overrides: super::parse_overrides(&args.options)?,
        release: args.release,
    };

    let outcome = run_build(&root, &request)?;

    eprintln!(
        "    Finished {} build of {} v{}",
        outcome.platform.build_type,
        outcome.recipe.package.name,
        outcome.recipe.package.version
    );

    Ok(())
}
