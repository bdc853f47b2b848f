//! `shipwright package` command

use anyhow::Result;

use crate::cli::PackageArgs;
use shipwright::ops::{run_package, BuildRequest};

pub fn execute(args: PackageArgs) -> Result<()> {
    let root = super::project_root(&args.path)?;

    let request = BuildRequest {
        overrides: super::parse_overrides(&args.options)?,
        release: args.release,
    };

    let outcome = run_package(&root, &request)?;

    eprintln!(
        "    Packaged {} at {}",
        outcome.info.package_name,
        outcome.layout.install_root.display()
    );

    println!("package:     {}", outcome.info.package_name);
    println!("target:      {}", outcome.info.target_name);
    println!("libs:        {}", outcome.info.libs.join(", "));
    println!("system libs: {}", outcome.info.system_libs.join(", "));

    Ok(())
}
