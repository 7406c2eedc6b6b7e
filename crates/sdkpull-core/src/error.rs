use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum SetupError {
    // Resolution errors
    #[error("Unsupported platform '{platform}' (supported platforms: {supported})")]
    UnsupportedPlatform { platform: String, supported: String },

    #[error("Cannot detect platform from installer: {file}")]
    PlatformDetectionFailed { file: String },

    // Download errors
    #[error("Authentication failed: no token in login response")]
    AuthenticationFailed,

    #[error("Failed to retrieve download URL: no url in link response")]
    LinkRetrievalFailed,

    #[error("Download link not found: {url} ({reason})")]
    LinkNotFound { url: String, reason: String },

    #[error(transparent)]
    Http(#[from] HttpError),

    // Installation errors
    #[error("Installer not found: {}", path.display())]
    InstallerNotFound { path: PathBuf },

    #[error(
        "Cannot extract Windows installer. Please install 7-Zip:\n  \
         1. Download from: https://www.7-zip.org/download.html\n  \
         2. Install to default location\n  \
         3. Re-run this command\n\n\
         For CI/CD, install 7-Zip in your pipeline:\n  \
         winget install -e --id 7zip.7zip\n  \
         choco install 7zip  (Chocolatey)\n  \
         or use GitHub Actions: actions/setup-7zip"
    )]
    NoExtractorAvailable,

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SetupError>;
