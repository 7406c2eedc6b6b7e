mod context;
mod fmod;
mod output;
mod platforms;
mod progress;
mod raylib;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use sdkpull_core::SetupError;

use context::Context;
use output::{Output, Verbosity};
use progress::ProgressManager;

#[derive(Parser, Debug)]
#[command(name = "sdkpull")]
#[command(about = "Download and install native SDKs into a project's libs directory")]
#[command(version)]
struct Cli {
    /// Project directory; libs are installed under <DIR>/libs
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable progress output
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// FMOD Studio API (requires an fmod.com account)
    Fmod {
        #[command(subcommand)]
        command: fmod::FmodCommands,
    },

    /// raylib release archives from GitHub
    Raylib {
        #[command(subcommand)]
        command: raylib::RaylibCommands,
    },

    /// List supported platforms and release file names
    Platforms(platforms::PlatformsArgs),
}

/// Print a failed setup with its cause chain and some things to check
pub(crate) fn report_setup_failure(ctx: &Context, error: &SetupError, hints: &[&str]) {
    let rule = "=".repeat(60);
    ctx.output.writeln(&format!("\n{}", rule));
    ctx.output.writeln("✗ Setup Failed!");
    ctx.output.writeln(&rule);
    ctx.output.error(&error.to_string());

    let mut source = error.source();
    while let Some(cause) = source {
        ctx.output.writeln(&format!("  Caused by: {}", cause));
        source = cause.source();
    }

    ctx.output.writeln("\nTroubleshooting:");
    for hint in hints {
        ctx.output.writeln(&format!("  - {}", hint));
    }
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let verbosity = Verbosity::from_occurrences(cli.verbose);
    init_logging(verbosity);

    let ctx = Context::load(
        &cli.project_dir,
        Output::new(verbosity),
        ProgressManager::new(!cli.no_progress),
    )?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        match cli.command {
            Commands::Fmod { command } => fmod::execute(command, &ctx).await,
            Commands::Raylib { command } => raylib::execute(command, &ctx).await,
            Commands::Platforms(args) => platforms::execute(args, &ctx),
        }
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            println!("Error: {}", e);
            for cause in e.chain().skip(1) {
                println!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
