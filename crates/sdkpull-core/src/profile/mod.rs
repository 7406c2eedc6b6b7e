//! Static per-platform profiles for each supported SDK.
//!
//! A [`PlatformProfile`] describes everything the downloader and installer need to know
//! about one SDK on one platform: how the release file is named, where it lives on the
//! distributor's side, how it is packaged, and which parts of the unpacked tree end up in
//! the project's library directory.

mod fmod;
mod raylib;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::{Result, SetupError};

const VERSION_PLACEHOLDER: &str = "{version}";

/// SDKs this tool knows how to install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sdk {
    Fmod,
    Raylib,
}

impl Sdk {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Sdk::Fmod => "FMOD Studio API",
            Sdk::Raylib => "raylib",
        }
    }

    /// Subdirectory of the library root the SDK is installed into
    pub fn dir_name(&self) -> &'static str {
        match self {
            Sdk::Fmod => "fmod",
            Sdk::Raylib => "raylib",
        }
    }

    /// Prefix of the scratch directory used while installing
    pub fn workspace_prefix(&self) -> &'static str {
        match self {
            Sdk::Fmod => "temp_fmod_install_",
            Sdk::Raylib => "temp_raylib_install_",
        }
    }

    /// All profiles for this SDK
    pub fn profiles(&self) -> &'static [PlatformProfile] {
        match self {
            Sdk::Fmod => &fmod::PROFILES,
            Sdk::Raylib => &raylib::PROFILES,
        }
    }

    /// Profile for a parsed platform
    pub fn profile(&self, platform: Platform) -> &'static PlatformProfile {
        self.profiles()
            .iter()
            .find(|p| p.platform == platform)
            .unwrap_or_else(|| unreachable!("{} has no profile for {}", self.name(), platform))
    }

    /// Infer the platform from an installer file name.
    ///
    /// This only looks at the name, never at the file contents, and refuses to guess
    /// when no rule matches.
    pub fn detect_platform(&self, file_name: &str) -> Result<Platform> {
        let name = file_name.to_lowercase();
        let rules = match self {
            Sdk::Fmod => fmod::DETECTION,
            Sdk::Raylib => raylib::DETECTION,
        };

        rules
            .iter()
            .find(|rule| name.contains(rule.contains) && name.ends_with(rule.extension))
            .map(|rule| rule.platform)
            .ok_or_else(|| SetupError::PlatformDetectionFailed {
                file: file_name.to_string(),
            })
    }
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the profile for a platform key.
///
/// Fails with [`SetupError::UnsupportedPlatform`] before anything touches the network or the
/// filesystem.
pub fn resolve(sdk: Sdk, platform_key: &str) -> Result<&'static PlatformProfile> {
    let platform: Platform = platform_key.parse()?;
    Ok(sdk.profile(platform))
}

/// Filename substring + extension pair identifying a platform
#[derive(Debug, Clone, Copy)]
pub(crate) struct DetectionRule {
    pub contains: &'static str,
    pub extension: &'static str,
    pub platform: Platform,
}

/// How a release file is packaged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Self-extracting Windows installer, unpacked with 7-Zip
    Installer7z,
    /// Gzipped tarball
    TarGz,
    /// Zip archive
    Zip,
    /// macOS disk image, mounted with hdiutil
    DiskImage,
}

impl ArchiveFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ArchiveFormat::Installer7z => "installer (7-Zip)",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::DiskImage => "disk image (hdiutil)",
        }
    }
}

/// How the installer finds the directory that component paths are relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootDiscovery {
    /// Parent of the shallowest directory with this name
    Marker(&'static str),
    /// The extraction workspace itself
    Workspace,
}

/// What a copied component is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    CoreHeaders,
    CoreLibraries,
    StudioHeaders,
    StudioLibraries,
    Headers,
    Libraries,
    Plugin,
}

impl ComponentRole {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentRole::CoreHeaders => "core headers",
            ComponentRole::CoreLibraries => "core libraries",
            ComponentRole::StudioHeaders => "studio headers",
            ComponentRole::StudioLibraries => "studio libraries",
            ComponentRole::Headers => "headers",
            ComponentRole::Libraries => "libraries",
            ComponentRole::Plugin => "plugin",
        }
    }
}

/// Where a component lives inside the extracted tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePath {
    /// Path relative to the resolved source root
    Relative(&'static str),
    /// Shallowest directory with this name anywhere in the workspace
    Search(&'static str),
}

/// How a component is copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    /// Recursive copy that merges into an existing destination, overwriting files
    MergeDir,
    /// A single file, copied by name into the destination directory
    File,
}

/// Destination of a component below `<libs>/<sdk>/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub base: &'static str,
    /// Append the profile's `lib_subdir`
    pub per_platform: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub role: ComponentRole,
    pub source: SourcePath,
    pub kind: CopyKind,
    pub dest: Destination,
}

impl Component {
    /// Display name, including the file name for single-file components
    pub fn display_name(&self) -> String {
        match (self.kind, self.source) {
            (CopyKind::File, SourcePath::Relative(path) | SourcePath::Search(path)) => {
                let file = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                format!("{} {}", self.role.label(), file)
            }
            _ => self.role.label().to_string(),
        }
    }
}

/// Everything known about one SDK on one platform
#[derive(Debug, PartialEq, Eq)]
pub struct PlatformProfile {
    pub sdk: Sdk,
    pub platform: Platform,
    pub filename_template: &'static str,
    pub remote_path: Option<&'static str>,
    pub lib_subdir: &'static str,
    pub format: ArchiveFormat,
    pub root: RootDiscovery,
    pub components: &'static [Component],
}

impl PlatformProfile {
    /// Release file name for a version
    pub fn filename(&self, version: &str) -> String {
        self.filename_template.replace(VERSION_PLACEHOLDER, version)
    }

    /// Destination directory of a component under the library root
    pub fn destination(&self, libs_dir: &Path, component: &Component) -> PathBuf {
        let mut dest = libs_dir.join(self.sdk.dir_name()).join(component.dest.base);
        if component.dest.per_platform {
            dest.push(self.lib_subdir);
        }
        dest
    }
}
