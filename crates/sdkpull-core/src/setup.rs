//! Download-then-install orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::downloader::{Credentials, DownloadOutcome, FmodDownloader, RaylibDownloader};
use crate::http::HttpClient;
use crate::installer::{InstallReport, Installer};
use crate::profile::{self, Sdk};
use crate::{Result, SetupError};

/// Result of a successful setup
#[derive(Debug, Clone)]
pub struct SetupReport {
    /// The release file handed to the installer
    pub installer: PathBuf,
    pub download: DownloadOutcome,
    pub install: InstallReport,
}

/// Runs the download and install steps in order, stopping at the first failure
pub struct Setup {
    settings: Settings,
    http_client: Arc<HttpClient>,
}

impl Setup {
    pub fn new(settings: Settings) -> Result<Self> {
        let http_client = HttpClient::with_config(settings.http.clone())
            .map_err(|e| SetupError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(settings, Arc::new(http_client)))
    }

    pub fn with_client(settings: Settings, http_client: Arc<HttpClient>) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    pub fn fmod_downloader(&self) -> FmodDownloader {
        FmodDownloader::new(self.http_client.clone(), &self.settings.download_dir)
            .with_endpoints(&self.settings.fmod_login_url, &self.settings.fmod_link_url)
    }

    pub fn raylib_downloader(&self) -> RaylibDownloader {
        RaylibDownloader::new(self.http_client.clone(), &self.settings.download_dir)
            .with_releases_url(&self.settings.raylib_releases_url)
    }

    pub fn installer(&self, sdk: Sdk) -> Installer {
        Installer::new(sdk, self.settings.install_options())
    }

    /// Path the installer step reads, derived from the profile and not from the download.
    pub fn installer_path(&self, sdk: Sdk, platform_key: &str, version: &str) -> Result<PathBuf> {
        let profile = profile::resolve(sdk, platform_key)?;
        Ok(self.settings.download_dir.join(profile.filename(version)))
    }

    /// Download and install the FMOD Studio API
    pub async fn fmod<F>(
        &self,
        credentials: &Credentials,
        platform_key: &str,
        version: &str,
        delete_after: bool,
        progress: Option<F>,
    ) -> Result<SetupReport>
    where
        F: Fn(u64, u64),
    {
        let installer = self.installer_path(Sdk::Fmod, platform_key, version)?;

        log::info!("[Step 1/2] Downloading {} installer", Sdk::Fmod);
        let download = self
            .fmod_downloader()
            .fetch(credentials, platform_key, version, progress)
            .await?;

        self.install_step(Sdk::Fmod, installer, download, delete_after)
    }

    /// Download and install raylib
    pub async fn raylib<F>(
        &self,
        platform_key: &str,
        version: &str,
        delete_after: bool,
        progress: Option<F>,
    ) -> Result<SetupReport>
    where
        F: Fn(u64, u64),
    {
        let installer = self.installer_path(Sdk::Raylib, platform_key, version)?;

        log::info!("[Step 1/2] Downloading {} archive", Sdk::Raylib);
        let download = self
            .raylib_downloader()
            .fetch(platform_key, version, progress)
            .await?;

        self.install_step(Sdk::Raylib, installer, download, delete_after)
    }

    fn install_step(
        &self,
        sdk: Sdk,
        installer: PathBuf,
        download: DownloadOutcome,
        delete_after: bool,
    ) -> Result<SetupReport> {
        if download.path != installer {
            log::warn!(
                "Downloaded {} but expected {}",
                download.path.display(),
                installer.display()
            );
        }

        log::info!("[Step 2/2] Installing {} files", sdk);
        let install = self.installer(sdk).install(&installer, delete_after)?;

        Ok(SetupReport {
            installer,
            download,
            install,
        })
    }
}
