//! Scratch directory owning everything an extraction produces.

use std::io;
use std::path::Path;

use tempfile::TempDir;

/// A uniquely named temporary directory, removed when the install attempt ends
pub struct ExtractionWorkspace {
    dir: TempDir,
}

impl ExtractionWorkspace {
    /// Create `<prefix><random>` under `parent`, or under the system temp dir when `None`
    pub fn create(prefix: &str, parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let dir = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };

        log::debug!("Created extraction workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace recursively.
    ///
    /// A failure here is logged rather than returned: the scratch tree has no value once
    /// the copy step is over and must not mask the install result.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => log::debug!("Removed extraction workspace {}", path.display()),
            Err(e) => log::warn!("Failed to remove temporary directory {}: {}", path.display(), e),
        }
    }
}
