//! Archive extraction.
//!
//! Each [`ArchiveFormat`] has its own extractor. Tarballs and zips are unpacked in-process;
//! Windows installers need an external 7-Zip and macOS disk images are mounted with
//! `hdiutil`.

mod archive;
mod disk_image;
mod seven_zip;
mod workspace;

use std::path::{Path, PathBuf};

pub use archive::ArchiveExtractor;
pub use disk_image::DiskImageExtractor;
pub use seven_zip::{SevenZipExtractor, DEFAULT_SEVEN_ZIP_CANDIDATES};
pub use workspace::ExtractionWorkspace;

use crate::profile::ArchiveFormat;
use crate::Result;

/// Settings for the external-tool extractors
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Extra 7-Zip executables, tried before the built-in candidates
    pub seven_zip_paths: Vec<PathBuf>,
}

/// Extract `archive_path` into `dest_dir` using the handler for `format`
pub fn extract(
    format: ArchiveFormat,
    archive_path: &Path,
    dest_dir: &Path,
    options: &ExtractOptions,
) -> Result<()> {
    log::debug!("Extracting {} ({:?}) into {}", archive_path.display(), format, dest_dir.display());

    match format {
        ArchiveFormat::TarGz => ArchiveExtractor::extract_tar_gz(archive_path, dest_dir),
        ArchiveFormat::Zip => ArchiveExtractor::extract_zip(archive_path, dest_dir),
        ArchiveFormat::Installer7z => {
            SevenZipExtractor::with_extra_candidates(&options.seven_zip_paths)
                .extract(archive_path, dest_dir)
        }
        ArchiveFormat::DiskImage => DiskImageExtractor::new().extract(archive_path, dest_dir),
    }
}
