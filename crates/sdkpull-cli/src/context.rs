//! State shared by every command of one invocation.

use anyhow::{Context as _, Result};
use std::path::Path;

use sdkpull_core::{InstallReport, Settings, Setup};

use crate::output::Output;
use crate::progress::{format_bytes, ProgressManager};

pub struct Context {
    pub settings: Settings,
    pub output: Output,
    pub progress: ProgressManager,
}

impl Context {
    /// Load settings for `project_dir`, honoring `sdkpull.toml` when present
    pub fn load(project_dir: &Path, output: Output, progress: ProgressManager) -> Result<Self> {
        let settings = Settings::load(project_dir)
            .with_context(|| format!("Failed to load settings for {}", project_dir.display()))?;
        log::debug!("Effective settings: {:?}", settings);

        Ok(Self {
            settings,
            output,
            progress,
        })
    }

    pub fn setup(&self) -> Result<Setup> {
        Ok(Setup::new(self.settings.clone())?)
    }

    pub fn downloaded(&self, path: &Path, bytes: u64) {
        self.output.success(&format!(
            "Downloaded {} ({})",
            path.display(),
            format_bytes(bytes)
        ));
    }

    pub fn installed(&self, report: &InstallReport) {
        self.output.copy_report(&report.copy);
        self.output.success(&format!(
            "Installed {} files to {}",
            report.copy.copied_files(),
            report.destination.display()
        ));
    }
}
