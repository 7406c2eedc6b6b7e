//! SDK downloaders.
//!
//! Both downloaders resolve the platform profile first, so an unknown platform never
//! reaches the network. They differ only in how the final download URL is obtained:
//! FMOD gates it behind a login and a signed-link request, raylib is a public release.

mod fmod;
mod raylib;

use std::path::PathBuf;

pub use fmod::{Credentials, FmodDownloader, FMOD_DOWNLOAD_LINK_URL, FMOD_LOGIN_URL};
pub use raylib::{RaylibDownloader, RAYLIB_RELEASES_URL};

/// Result of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub path: PathBuf,
    pub bytes: u64,
}
