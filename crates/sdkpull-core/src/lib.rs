pub mod config;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod http;
pub mod installer;
pub mod platform;
pub mod profile;
pub mod setup;
pub mod util;

#[cfg(test)]
mod test_log;

pub use error::{Result, SetupError};
pub use platform::Platform;
pub use profile::{resolve, PlatformProfile, Sdk};
pub use config::{Settings, SdkpullConfig};
pub use downloader::{Credentials, DownloadOutcome, FmodDownloader, RaylibDownloader};
pub use installer::{CopyReport, InstallOptions, InstallReport, Installer};
pub use setup::{Setup, SetupReport};
