//! `shipwright info` command
//!
//! Publishes the consumer-facing metadata without building anything.

use anyhow::Result;

use crate::cli::InfoArgs;
use shipwright::core::package_info;
use shipwright::core::platform::{BuildType, OsFamily, PlatformFacts};
use shipwright::Recipe;

pub fn execute(args: InfoArgs) -> Result<()> {
    let root = super::project_root(&args.path)?;
    let recipe = Recipe::load(&root)?;

    let mut platform = PlatformFacts::host(BuildType::Debug);
    if let Some(ref os) = args.os {
        platform = platform.with_os(OsFamily::parse(os));
    }

    let info = package_info::publish(&recipe, &platform)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("package:     {}", info.package_name);
        println!("target:      {}", info.target_name);
        println!("libs:        {}", info.libs.join(", "));
        if info.requires.is_empty() {
            println!("requires:    (none)");
        } else {
            println!("requires:    {}", info.requires.join(", "));
        }
        println!("system libs: {}", info.system_libs.join(", "));
    }

    Ok(())
}
