//! macOS disk image extraction.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::util::merge_copy_dir;
use crate::{Result, SetupError};

const MOUNT_DIR_NAME: &str = "dmg_mount";

/// Mounts a `.dmg` with `hdiutil`, copies its contents out, and detaches it again
pub struct DiskImageExtractor {
    hdiutil: PathBuf,
}

impl DiskImageExtractor {
    pub fn new() -> Self {
        Self {
            hdiutil: PathBuf::from("hdiutil"),
        }
    }

    /// Use a specific `hdiutil` executable
    pub fn with_tool(hdiutil: impl Into<PathBuf>) -> Self {
        Self {
            hdiutil: hdiutil.into(),
        }
    }

    pub fn extract(&self, image_path: &Path, dest_dir: &Path) -> Result<()> {
        let mount_point = dest_dir.join(MOUNT_DIR_NAME);
        fs::create_dir_all(&mount_point)?;

        let status = Command::new(&self.hdiutil)
            .arg("attach")
            .arg(image_path)
            .arg("-mountpoint")
            .arg(&mount_point)
            .arg("-nobrowse")
            .status()
            .map_err(|e| SetupError::ExtractionFailed(format!("Failed to run hdiutil: {}", e)))?;

        if !status.success() {
            Self::remove_mount_point(&mount_point);
            return Err(SetupError::ExtractionFailed(format!(
                "hdiutil attach {} exited with {}",
                image_path.display(),
                status
            )));
        }

        let copied = Self::copy_contents(&mount_point, dest_dir);
        self.detach(&mount_point);
        copied?;

        // Once detached the mount point is an empty directory; leaving it would put a
        // stray folder next to the payload.
        Self::remove_mount_point(&mount_point);

        log::info!("Extracted disk image {}", image_path.display());
        Ok(())
    }

    fn remove_mount_point(mount_point: &Path) {
        if let Err(e) = fs::remove_dir(mount_point) {
            log::debug!("Could not remove mount point {}: {}", mount_point.display(), e);
        }
    }

    fn copy_contents(mount_point: &Path, dest_dir: &Path) -> Result<()> {
        for entry in fs::read_dir(mount_point)? {
            let entry = entry?;
            let target = dest_dir.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                merge_copy_dir(&entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    /// Best-effort: a failed detach is logged and never fails the install.
    fn detach(&self, mount_point: &Path) {
        match Command::new(&self.hdiutil).arg("detach").arg(mount_point).status() {
            Ok(status) if status.success() => {}
            Ok(status) => log::warn!("hdiutil detach {} exited with {}", mount_point.display(), status),
            Err(e) => log::warn!("Failed to detach {}: {}", mount_point.display(), e),
        }
    }
}

impl Default for DiskImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}
