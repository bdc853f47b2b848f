//! `shipwright clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use shipwright::core::options::OptionSet;
use shipwright::core::platform::{BuildType, PlatformFacts};
use shipwright::util::fs::remove_dir_all_if_exists;
use shipwright::Layout;

pub fn execute(args: CleanArgs) -> Result<()> {
    let root = super::project_root(&args.path)?;

    let options = OptionSet::resolve(&super::parse_overrides(&args.options)?)?;
    let build_type = if args.release {
        BuildType::Release
    } else {
        BuildType::Debug
    };
    let platform = PlatformFacts::host(build_type);

    let layout = Layout::resolve(&root, &options, &platform)?;

    if args.all {
        // Remove every configuration at once
        let work_dir = layout.work_dir();
        remove_dir_all_if_exists(&work_dir)?;
        eprintln!("     Removed {}", work_dir.display());
    } else {
        remove_dir_all_if_exists(&layout.build_root)?;
        remove_dir_all_if_exists(&layout.install_root)?;
        eprintln!("     Removed {}", layout.build_root.display());
        eprintln!("     Removed {}", layout.install_root.display());
    }

    Ok(())
}
