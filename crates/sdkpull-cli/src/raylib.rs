//! raylib commands: get, install, setup.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use sdkpull_core::{Installer, Sdk};

use crate::context::Context;
use crate::progress::download_callback;
use crate::report_setup_failure;

#[derive(Subcommand, Debug)]
pub enum RaylibCommands {
    /// Download a raylib release archive from GitHub
    Get(GetArgs),

    /// Extract a release archive into the project's libs directory
    Install(InstallArgs),

    /// Download then install
    Setup(SetupArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Target platform (mac, linux, windows)
    pub platform: String,

    /// Release version, e.g. 5.5
    pub version: String,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Release archive, e.g. raylib-5.5_linux_amd64.tar.gz
    pub archive: PathBuf,

    /// Delete the archive after a successful install
    #[arg(long)]
    pub delete_installer: bool,
}

#[derive(Args, Debug)]
pub struct SetupArgs {
    #[command(flatten)]
    pub get: GetArgs,

    /// Delete the archive after a successful install
    #[arg(long)]
    pub delete_installer: bool,
}

const TROUBLESHOOTING: &[&str] = &["Check that the platform and version are correct"];

pub async fn execute(command: RaylibCommands, ctx: &Context) -> Result<i32> {
    match command {
        RaylibCommands::Get(args) => get(args, ctx).await,
        RaylibCommands::Install(args) => install(args, ctx),
        RaylibCommands::Setup(args) => setup(args, ctx).await,
    }
}

async fn get(args: GetArgs, ctx: &Context) -> Result<i32> {
    let setup = ctx.setup()?;
    let filename = sdkpull_core::resolve(Sdk::Raylib, &args.platform)?.filename(&args.version);
    ctx.output.info(&format!(
        "Downloading {}",
        setup.raylib_downloader().release_url(&args.version, &filename)
    ));

    let pb = ctx.progress.create_download_bar(&filename);
    let result = setup
        .raylib_downloader()
        .fetch(&args.platform, &args.version, Some(download_callback(&pb)))
        .await;
    pb.finish_and_clear();

    let outcome = result.context("raylib download failed")?;
    ctx.downloaded(&outcome.path, outcome.bytes);
    Ok(0)
}

fn install(args: InstallArgs, ctx: &Context) -> Result<i32> {
    let installer = Installer::new(Sdk::Raylib, ctx.settings.install_options());

    let spinner = ctx
        .progress
        .create_spinner(&format!("Installing from {}", args.archive.display()));
    let result = installer.install(&args.archive, args.delete_installer);
    spinner.finish_and_clear();

    let report = result.with_context(|| format!("Failed to install {}", args.archive.display()))?;
    ctx.installed(&report);
    ctx.output.installer_status(&args.archive, report.installer_deleted);
    Ok(0)
}

async fn setup(args: SetupArgs, ctx: &Context) -> Result<i32> {
    let setup = ctx.setup()?;

    ctx.output.section(&format!("{} Setup", Sdk::Raylib));
    ctx.output.writeln(&format!("Platform: {}", args.get.platform));
    ctx.output.writeln(&format!("Version:  {}", args.get.version));

    let pb = ctx.progress.create_download_bar(Sdk::Raylib.name());
    let result = setup
        .raylib(
            &args.get.platform,
            &args.get.version,
            args.delete_installer,
            Some(download_callback(&pb)),
        )
        .await;
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            ctx.downloaded(&report.download.path, report.download.bytes);
            ctx.installed(&report.install);
            ctx.output.installer_status(&report.installer, report.install.installer_deleted);
            ctx.output.writeln("You can now build your project with raylib.");
            Ok(0)
        }
        Err(e) => {
            report_setup_failure(ctx, &e, TROUBLESHOOTING);
            Ok(1)
        }
    }
}
