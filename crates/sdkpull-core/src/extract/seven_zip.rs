//! Windows installer extraction through 7-Zip.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Result, SetupError};

/// 7-Zip executables tried in order, most common in CI environments first
pub const DEFAULT_SEVEN_ZIP_CANDIDATES: &[&str] = &[
    "7z",
    r"C:\Program Files\7-Zip\7z.exe",
    r"C:\Program Files (x86)\7-Zip\7z.exe",
];

/// Runs `7z x` against the first candidate executable that works
pub struct SevenZipExtractor {
    candidates: Vec<PathBuf>,
}

impl SevenZipExtractor {
    pub fn new() -> Self {
        Self::with_extra_candidates(&[])
    }

    /// Try `extra` before the built-in candidates
    pub fn with_extra_candidates(extra: &[PathBuf]) -> Self {
        let candidates = extra
            .iter()
            .cloned()
            .chain(DEFAULT_SEVEN_ZIP_CANDIDATES.iter().map(PathBuf::from))
            .collect();
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Extract `archive_path` into `dest_dir`.
    ///
    /// Fails with [`SetupError::NoExtractorAvailable`] when every candidate is missing or
    /// exits unsuccessfully.
    pub fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dest_dir)?;

        let mut output_arg = std::ffi::OsString::from("-o");
        output_arg.push(dest_dir.as_os_str());

        for candidate in &self.candidates {
            let result = Command::new(candidate)
                .arg("x")
                .arg(archive_path)
                .arg(&output_arg)
                .arg("-y")
                .output();

            match result {
                Ok(output) if output.status.success() => {
                    log::info!("Extracted with 7-Zip ({})", candidate.display());
                    return Ok(());
                }
                Ok(output) => {
                    log::debug!(
                        "{} exited with {}: {}",
                        candidate.display(),
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
                Err(e) => {
                    log::debug!("{} not usable: {}", candidate.display(), e);
                }
            }
        }

        Err(SetupError::NoExtractorAvailable)
    }
}

impl Default for SevenZipExtractor {
    fn default() -> Self {
        Self::new()
    }
}
