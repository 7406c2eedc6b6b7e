//! FMOD Studio API profiles.

use super::{
    ArchiveFormat, Component, ComponentRole, CopyKind, DetectionRule, Destination,
    PlatformProfile, RootDiscovery, Sdk, SourcePath,
};
use crate::platform::Platform;

pub(crate) const DETECTION: &[DetectionRule] = &[
    DetectionRule { contains: "win", extension: ".exe", platform: Platform::Windows },
    DetectionRule { contains: "linux", extension: ".tar.gz", platform: Platform::Linux },
    DetectionRule { contains: "mac", extension: ".dmg", platform: Platform::Mac },
];

const fn headers(role: ComponentRole, source: &'static str, base: &'static str) -> Component {
    Component {
        role,
        source: SourcePath::Relative(source),
        kind: CopyKind::MergeDir,
        dest: Destination { base, per_platform: false },
    }
}

const fn libraries(role: ComponentRole, source: &'static str, base: &'static str) -> Component {
    Component {
        role,
        source: SourcePath::Relative(source),
        kind: CopyKind::MergeDir,
        dest: Destination { base, per_platform: true },
    }
}

const fn plugin(source: &'static str) -> Component {
    Component {
        role: ComponentRole::Plugin,
        source: SourcePath::Relative(source),
        kind: CopyKind::File,
        dest: Destination { base: "plugins", per_platform: true },
    }
}

const CORE_INC: Component = headers(ComponentRole::CoreHeaders, "api/core/inc", "core/inc");
const STUDIO_INC: Component = headers(ComponentRole::StudioHeaders, "api/studio/inc", "studio/inc");

const MAC_COMPONENTS: [Component; 6] = [
    CORE_INC,
    libraries(ComponentRole::CoreLibraries, "api/core/lib", "core/lib"),
    STUDIO_INC,
    libraries(ComponentRole::StudioLibraries, "api/studio/lib", "studio/lib"),
    plugin("plugins/fmod_haptics/lib/fmod_haptics.dylib"),
    plugin("plugins/resonance_audio/lib/resonanceaudio.dylib"),
];

const LINUX_COMPONENTS: [Component; 5] = [
    CORE_INC,
    libraries(ComponentRole::CoreLibraries, "api/core/lib/x86_64", "core/lib"),
    STUDIO_INC,
    libraries(ComponentRole::StudioLibraries, "api/studio/lib/x86_64", "studio/lib"),
    plugin("plugins/resonance_audio/lib/resonanceaudio.so"),
];

const WINDOWS_COMPONENTS: [Component; 6] = [
    CORE_INC,
    libraries(ComponentRole::CoreLibraries, "api/core/lib/x64", "core/lib"),
    STUDIO_INC,
    libraries(ComponentRole::StudioLibraries, "api/studio/lib/x64", "studio/lib"),
    plugin("plugins/fmod_haptics/lib/x64/fmod_haptics.dll"),
    plugin("plugins/resonance_audio/lib/x64/resonanceaudio.dll"),
];

pub(crate) static PROFILES: [PlatformProfile; 3] = [
    PlatformProfile {
        sdk: Sdk::Fmod,
        platform: Platform::Mac,
        filename_template: "fmodstudioapi{version}mac-installer.dmg",
        remote_path: Some("files/fmodstudio/api/Mac/"),
        lib_subdir: "mac",
        format: ArchiveFormat::DiskImage,
        root: RootDiscovery::Marker("api"),
        components: &MAC_COMPONENTS,
    },
    PlatformProfile {
        sdk: Sdk::Fmod,
        platform: Platform::Linux,
        filename_template: "fmodstudioapi{version}linux.tar.gz",
        remote_path: Some("files/fmodstudio/api/Linux/"),
        lib_subdir: "linux_x64",
        format: ArchiveFormat::TarGz,
        root: RootDiscovery::Marker("api"),
        components: &LINUX_COMPONENTS,
    },
    PlatformProfile {
        sdk: Sdk::Fmod,
        platform: Platform::Windows,
        filename_template: "fmodstudioapi{version}win-installer.exe",
        remote_path: Some("files/fmodstudio/api/Windows/"),
        lib_subdir: "win_x64",
        format: ArchiveFormat::Installer7z,
        root: RootDiscovery::Marker("api"),
        components: &WINDOWS_COMPONENTS,
    },
];
