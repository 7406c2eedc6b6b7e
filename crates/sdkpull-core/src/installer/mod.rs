//! SDK installer.
//!
//! Turns a downloaded release file into files under `<libs>/<sdk>/`:
//!
//! 1. detect the platform from the file name,
//! 2. extract into a fresh [`ExtractionWorkspace`],
//! 3. copy the profile's components into the library directory,
//! 4. remove the workspace, whatever happened before,
//! 5. optionally delete the release file, only when everything succeeded.

mod copy;
mod report;

use std::path::{Path, PathBuf};

use crate::extract::{self, ExtractOptions, ExtractionWorkspace};
use crate::platform::Platform;
use crate::profile::Sdk;
use crate::{Result, SetupError};

pub use copy::copy_components;
pub use report::{ComponentOutcome, ComponentReport, CopyReport, InstallReport};

/// Where the installer writes and which external tools it may use
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Library root; the SDK lands in `<libs_dir>/<sdk>/`
    pub libs_dir: PathBuf,
    /// Parent of the extraction workspace (system temp dir when `None`)
    pub temp_root: Option<PathBuf>,
    pub extract: ExtractOptions,
}

impl InstallOptions {
    pub fn new(libs_dir: impl Into<PathBuf>) -> Self {
        Self {
            libs_dir: libs_dir.into(),
            temp_root: None,
            extract: ExtractOptions::default(),
        }
    }

    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(temp_root.into());
        self
    }

    pub fn with_seven_zip_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.extract.seven_zip_paths = paths;
        self
    }
}

/// Installs one SDK from its release files
pub struct Installer {
    sdk: Sdk,
    options: InstallOptions,
}

impl Installer {
    pub fn new(sdk: Sdk, options: InstallOptions) -> Self {
        Self { sdk, options }
    }

    /// `<libs_dir>/<sdk>`
    pub fn destination(&self) -> PathBuf {
        self.options.libs_dir.join(self.sdk.dir_name())
    }

    /// Install from a downloaded release file
    pub fn install(&self, archive: &Path, delete_after: bool) -> Result<InstallReport> {
        if !archive.is_file() {
            return Err(SetupError::InstallerNotFound {
                path: archive.to_path_buf(),
            });
        }

        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let platform = self.sdk.detect_platform(&file_name)?;
        log::info!("Installing {} for {} from {}", self.sdk, platform, file_name);

        let workspace = ExtractionWorkspace::create(
            self.sdk.workspace_prefix(),
            self.options.temp_root.as_deref(),
        )?;

        let copied = self.extract_and_copy(archive, platform, workspace.path());
        workspace.close();
        let copy = copied?;

        let mut installer_deleted = false;
        if delete_after {
            std::fs::remove_file(archive)?;
            log::info!("Deleted {}", archive.display());
            installer_deleted = true;
        }

        Ok(InstallReport {
            platform,
            destination: self.destination(),
            copy,
            installer_deleted,
        })
    }

    /// Copy from an already extracted tree, skipping download and extraction
    pub fn install_from_tree(&self, tree: &Path, platform: Platform) -> Result<InstallReport> {
        let copy = copy_components(tree, self.sdk.profile(platform), &self.options.libs_dir)?;
        Ok(InstallReport {
            platform,
            destination: self.destination(),
            copy,
            installer_deleted: false,
        })
    }

    fn extract_and_copy(&self, archive: &Path, platform: Platform, workspace: &Path) -> Result<CopyReport> {
        let profile = self.sdk.profile(platform);
        extract::extract(profile.format, archive, workspace, &self.options.extract)?;
        copy_components(workspace, profile, &self.options.libs_dir)
    }
}
