//! Platforms command - list supported platforms and release files per SDK.

use anyhow::Result;
use clap::Args;

use sdkpull_core::Sdk;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct PlatformsArgs {
    /// Show file names for this version instead of the template
    #[arg(long)]
    pub version: Option<String>,
}

pub fn execute(args: PlatformsArgs, ctx: &Context) -> Result<i32> {
    let widths = [10, 46, 14];

    for sdk in [Sdk::Fmod, Sdk::Raylib] {
        ctx.output.section(sdk.name());
        ctx.output.table_row(&["PLATFORM", "FILE", "LIB DIR"], &widths);

        for profile in sdk.profiles() {
            let file = match &args.version {
                Some(version) => profile.filename(version),
                None => profile.filename_template.to_string(),
            };
            ctx.output
                .table_row(&[profile.platform.key(), file.as_str(), profile.lib_subdir], &widths);
            ctx.output.verbose(&format!("    format: {}", profile.format.label()));
        }
    }

    Ok(0)
}
