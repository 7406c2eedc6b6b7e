//! FMOD Studio API commands: get, install, setup.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use sdkpull_core::{Credentials, Installer, Sdk};

use crate::context::Context;
use crate::progress::download_callback;
use crate::report_setup_failure;

#[derive(Subcommand, Debug)]
pub enum FmodCommands {
    /// Download the FMOD Studio API installer for a platform
    Get(GetArgs),

    /// Extract a downloaded installer into the project's libs directory
    Install(InstallArgs),

    /// Download then install
    Setup(SetupArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// fmod.com account user name or e-mail
    pub user: String,

    /// fmod.com account password
    pub password: String,

    /// Target platform (mac, linux, windows)
    pub platform: String,

    /// API version without dots, e.g. 20312
    pub version: String,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Installer file, e.g. fmodstudioapi20312linux.tar.gz
    pub installer: PathBuf,

    /// Delete the installer after a successful install
    #[arg(long)]
    pub delete_installer: bool,
}

#[derive(Args, Debug)]
pub struct SetupArgs {
    #[command(flatten)]
    pub get: GetArgs,

    /// Delete the installer after a successful install
    #[arg(long)]
    pub delete_installer: bool,
}

const TROUBLESHOOTING: &[&str] = &[
    "Check your FMOD credentials",
    "Ensure you have internet connectivity",
    "For Windows: Install 7-Zip (https://www.7-zip.org)",
    "Check that the platform and version are correct",
];

pub async fn execute(command: FmodCommands, ctx: &Context) -> Result<i32> {
    match command {
        FmodCommands::Get(args) => get(args, ctx).await,
        FmodCommands::Install(args) => install(args, ctx),
        FmodCommands::Setup(args) => setup(args, ctx).await,
    }
}

async fn get(args: GetArgs, ctx: &Context) -> Result<i32> {
    let setup = ctx.setup()?;
    let credentials = Credentials::new(args.user, args.password);
    let filename = sdkpull_core::resolve(Sdk::Fmod, &args.platform)?.filename(&args.version);

    ctx.output.info(&format!(
        "Downloading {} {} for {}",
        Sdk::Fmod,
        args.version,
        args.platform
    ));

    let pb = ctx.progress.create_download_bar(&filename);
    let result = setup
        .fmod_downloader()
        .fetch(&credentials, &args.platform, &args.version, Some(download_callback(&pb)))
        .await;
    pb.finish_and_clear();

    let outcome = result.context("FMOD download failed")?;
    ctx.downloaded(&outcome.path, outcome.bytes);
    Ok(0)
}

fn install(args: InstallArgs, ctx: &Context) -> Result<i32> {
    let installer = Installer::new(Sdk::Fmod, ctx.settings.install_options());

    let spinner = ctx
        .progress
        .create_spinner(&format!("Installing from {}", args.installer.display()));
    let result = installer.install(&args.installer, args.delete_installer);
    spinner.finish_and_clear();

    let report =
        result.with_context(|| format!("Failed to install {}", args.installer.display()))?;
    ctx.installed(&report);
    ctx.output.installer_status(&args.installer, report.installer_deleted);
    Ok(0)
}

async fn setup(args: SetupArgs, ctx: &Context) -> Result<i32> {
    let setup = ctx.setup()?;
    let credentials = Credentials::new(args.get.user, args.get.password);

    ctx.output.section(&format!("{} Setup", Sdk::Fmod));
    ctx.output.writeln(&format!("Platform: {}", args.get.platform));
    ctx.output.writeln(&format!("Version:  {}", args.get.version));

    let pb = ctx.progress.create_download_bar(Sdk::Fmod.name());
    let result = setup
        .fmod(
            &credentials,
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
            ctx.output.writeln("You can now build your project with FMOD support.");
            Ok(0)
        }
        Err(e) => {
            report_setup_failure(ctx, &e, TROUBLESHOOTING);
            Ok(1)
        }
    }
}
