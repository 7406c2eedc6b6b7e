//! In-process extraction of zip and tar.gz archives.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;

use crate::{Result, SetupError};

/// Archive extractor for the formats that need no external tool.
///
/// Entries are unpacked as-is (no leading components are stripped), since the installer
/// locates the payload by searching the extracted tree.
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    /// Extract a gzipped tar archive
    pub fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<()> {
        let file = File::open(archive_path)?;
        let decoder = GzDecoder::new(BufReader::new(file));
        Self::extract_tar_reader(decoder, dest_dir)
    }

    /// Extract from a tar reader
    pub fn extract_tar_reader<R: Read>(reader: R, dest_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dest_dir)?;
        let mut archive = tar::Archive::new(reader);
        archive.set_preserve_permissions(true);

        let entries = archive
            .entries()
            .map_err(|e| SetupError::ExtractionFailed(format!("Failed to read tar: {}", e)))?;

        for entry in entries {
            let mut entry = entry
                .map_err(|e| SetupError::ExtractionFailed(format!("Failed to read tar entry: {}", e)))?;

            let path = entry
                .path()
                .map_err(|e| SetupError::ExtractionFailed(format!("Invalid path in tar: {}", e)))?
                .into_owned();

            let Some(relative) = Self::sanitize(&path)? else {
                continue;
            };

            // unpack_in refuses entries that would land outside dest_dir
            let unpacked = entry
                .unpack_in(dest_dir)
                .map_err(|e| SetupError::ExtractionFailed(format!("Failed to extract {}: {}", relative.display(), e)))?;

            if !unpacked {
                return Err(SetupError::ExtractionFailed(format!(
                    "Path traversal detected: {} escapes destination directory",
                    relative.display()
                )));
            }
        }

        Ok(())
    }

    /// Extract a zip archive
    pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dest_dir)?;
        let file = File::open(archive_path)?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| SetupError::ExtractionFailed(format!("Failed to open zip: {}", e)))?;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| SetupError::ExtractionFailed(format!("Failed to read zip entry: {}", e)))?;

            let relative = match file.enclosed_name() {
                Some(path) => path.to_path_buf(),
                None => {
                    return Err(SetupError::ExtractionFailed(format!(
                        "Path traversal detected in archive: {}",
                        file.name()
                    )))
                }
            };

            if relative.as_os_str().is_empty() {
                continue;
            }

            let outpath = dest_dir.join(&relative);

            if file.is_dir() {
                std::fs::create_dir_all(&outpath)?;
                continue;
            }

            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;

            // Set permissions on Unix
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = file.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }

        Ok(())
    }

    /// Normalize a tar entry path, rejecting absolute paths and `..` components.
    ///
    /// Returns `None` for entries that refer to the archive root itself.
    fn sanitize(path: &Path) -> Result<Option<PathBuf>> {
        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(SetupError::ExtractionFailed(format!(
                        "Path traversal detected in archive: {}",
                        path.display()
                    )));
                }
            }
        }

        if relative.as_os_str().is_empty() {
            Ok(None)
        } else {
            Ok(Some(relative))
        }
    }
}
