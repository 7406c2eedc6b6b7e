//! raylib release downloader.

use std::path::PathBuf;
use std::sync::Arc;

use crate::http::HttpClient;
use crate::profile::{self, Sdk};
use crate::{Result, SetupError};

use super::DownloadOutcome;

pub const RAYLIB_RELEASES_URL: &str = "https://github.com/raysan5/raylib/releases/download";

/// Downloads raylib release archives from the public release page
pub struct RaylibDownloader {
    http_client: Arc<HttpClient>,
    releases_url: String,
    download_dir: PathBuf,
}

impl RaylibDownloader {
    pub fn new(http_client: Arc<HttpClient>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            http_client,
            releases_url: RAYLIB_RELEASES_URL.to_string(),
            download_dir: download_dir.into(),
        }
    }

    /// Use a different releases base URL (mirrors, tests)
    pub fn with_releases_url(mut self, releases_url: impl Into<String>) -> Self {
        self.releases_url = releases_url.into();
        self
    }

    /// Public URL of a release archive
    pub fn release_url(&self, version: &str, filename: &str) -> String {
        format!("{}/{}/{}", self.releases_url.trim_end_matches('/'), version, filename)
    }

    /// Download the archive for `platform_key` and `version`
    pub async fn fetch<F>(
        &self,
        platform_key: &str,
        version: &str,
        progress: Option<F>,
    ) -> Result<DownloadOutcome>
    where
        F: Fn(u64, u64),
    {
        let profile = profile::resolve(Sdk::Raylib, platform_key)?;
        let filename = profile.filename(version);
        let url = self.release_url(version, &filename);

        log::info!("Validating download link {}", url);
        self.http_client
            .probe(&url)
            .await
            .map_err(|e| SetupError::LinkNotFound {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let dest = self.download_dir.join(&filename);
        log::info!("Downloading {} to {}", filename, dest.display());
        let bytes = self.http_client.download(&url, &dest, progress).await?;

        Ok(DownloadOutcome { path: dest, bytes })
    }
}
