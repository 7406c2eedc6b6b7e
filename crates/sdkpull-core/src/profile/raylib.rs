//! raylib release profiles.

use super::{
    ArchiveFormat, Component, ComponentRole, CopyKind, DetectionRule, Destination,
    PlatformProfile, RootDiscovery, Sdk, SourcePath,
};
use crate::platform::Platform;

pub(crate) const DETECTION: &[DetectionRule] = &[
    DetectionRule { contains: "win", extension: ".zip", platform: Platform::Windows },
    DetectionRule { contains: "linux", extension: ".tar.gz", platform: Platform::Linux },
    DetectionRule { contains: "macos", extension: ".tar.gz", platform: Platform::Mac },
];

// Release archives share one layout on every platform.
const COMPONENTS: [Component; 2] = [
    Component {
        role: ComponentRole::Headers,
        source: SourcePath::Search("include"),
        kind: CopyKind::MergeDir,
        dest: Destination { base: "include", per_platform: false },
    },
    Component {
        role: ComponentRole::Libraries,
        source: SourcePath::Search("lib"),
        kind: CopyKind::MergeDir,
        dest: Destination { base: "lib", per_platform: true },
    },
];

pub(crate) static PROFILES: [PlatformProfile; 3] = [
    PlatformProfile {
        sdk: Sdk::Raylib,
        platform: Platform::Mac,
        filename_template: "raylib-{version}_macos.tar.gz",
        remote_path: None,
        lib_subdir: "mac",
        format: ArchiveFormat::TarGz,
        root: RootDiscovery::Workspace,
        components: &COMPONENTS,
    },
    PlatformProfile {
        sdk: Sdk::Raylib,
        platform: Platform::Linux,
        filename_template: "raylib-{version}_linux_amd64.tar.gz",
        remote_path: None,
        lib_subdir: "linux_x64",
        format: ArchiveFormat::TarGz,
        root: RootDiscovery::Workspace,
        components: &COMPONENTS,
    },
    PlatformProfile {
        sdk: Sdk::Raylib,
        platform: Platform::Windows,
        filename_template: "raylib-{version}_win64_msvc16.zip",
        remote_path: None,
        lib_subdir: "win_x64",
        format: ArchiveFormat::Zip,
        root: RootDiscovery::Workspace,
        components: &COMPONENTS,
    },
];
