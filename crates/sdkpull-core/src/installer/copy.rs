//! Selective copy from an extracted tree into the library directory.

use std::path::{Path, PathBuf};

use crate::profile::{Component, CopyKind, PlatformProfile, RootDiscovery, SourcePath};
use crate::util::{copy_file_into, find_dir_named, merge_copy_dir};
use crate::Result;

use super::report::{ComponentOutcome, ComponentReport, CopyReport};

/// Resolve the directory that relative component paths hang off.
///
/// Installer archives nest their payload under version-specific folders, so the marker
/// directory is searched for instead of assumed at a fixed depth. When it is absent the tree
/// root is used and the caller is told via the returned flag.
pub(crate) fn resolve_source_root(tree: &Path, root: RootDiscovery) -> (PathBuf, bool) {
    match root {
        RootDiscovery::Workspace => (tree.to_path_buf(), false),
        RootDiscovery::Marker(marker) => {
            match find_dir_named(tree, marker).and_then(|dir| dir.parent().map(Path::to_path_buf)) {
                Some(root) => (root, false),
                None => {
                    log::warn!(
                        "No '{}' directory found in {}; using it as the source root",
                        marker,
                        tree.display()
                    );
                    (tree.to_path_buf(), true)
                }
            }
        }
    }
}

fn locate(tree: &Path, source_root: &Path, source: SourcePath) -> PathBuf {
    match source {
        SourcePath::Relative(path) => source_root.join(path),
        SourcePath::Search(name) => {
            // Not found: report the name under the tree so the warning says where we looked.
            find_dir_named(tree, name).unwrap_or_else(|| tree.join(name))
        }
    }
}

/// Copy every component of `profile` found in `tree` into `libs_dir`.
///
/// Missing components are recorded, never fatal. IO failures while copying a component
/// that does exist abort the copy.
pub fn copy_components(tree: &Path, profile: &PlatformProfile, libs_dir: &Path) -> Result<CopyReport> {
    let (source_root, used_fallback_root) = resolve_source_root(tree, profile.root);
    log::debug!("Copying {} files from {}", profile.sdk, source_root.display());

    let mut components = Vec::with_capacity(profile.components.len());
    for component in profile.components {
        let outcome = copy_component(tree, &source_root, profile, component, libs_dir)?;
        components.push(ComponentReport {
            component: *component,
            outcome,
        });
    }

    Ok(CopyReport {
        source_root,
        used_fallback_root,
        components,
    })
}

fn copy_component(
    tree: &Path,
    source_root: &Path,
    profile: &PlatformProfile,
    component: &Component,
    libs_dir: &Path,
) -> Result<ComponentOutcome> {
    let source = locate(tree, source_root, component.source);
    let destination = profile.destination(libs_dir, component);

    let outcome = match component.kind {
        CopyKind::MergeDir if source.is_dir() => {
            let files = merge_copy_dir(&source, &destination)?;
            log::info!("Copied {} ({} files) to {}", component.display_name(), files, destination.display());
            ComponentOutcome::Copied { destination, files }
        }
        CopyKind::File if source.is_file() => {
            let target = copy_file_into(&source, &destination)?;
            log::info!("Copied {} to {}", component.display_name(), target.display());
            ComponentOutcome::Copied { destination, files: 1 }
        }
        _ => {
            log::warn!("{} not found at {}", component.display_name(), source.display());
            ComponentOutcome::Missing { source }
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::profile::Sdk;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_marker_root_is_parent_of_api() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("FMOD Studio API Windows/api/core")).unwrap();

        let (root, fallback) = resolve_source_root(temp.path(), RootDiscovery::Marker("api"));
        assert_eq!(root, temp.path().join("FMOD Studio API Windows"));
        assert!(!fallback);
    }

    #[test]
    fn test_marker_missing_falls_back_to_tree() {
        let temp = TempDir::new().unwrap();
        let (root, fallback) = resolve_source_root(temp.path(), RootDiscovery::Marker("api"));
        assert_eq!(root, temp.path());
        assert!(fallback);
    }

    #[test]
    fn test_plugins_are_flattened() {
        let temp = TempDir::new().unwrap();
        let tree = temp.path().join("tree");
        let libs = temp.path().join("libs");
        let root = tree.join("FMOD Studio API Windows");
        touch(&root.join("api/core/inc/fmod.h"));
        touch(&root.join("plugins/fmod_haptics/lib/x64/fmod_haptics.dll"));
        touch(&root.join("plugins/resonance_audio/lib/x64/resonanceaudio.dll"));

        let report = copy_components(&tree, Sdk::Fmod.profile(Platform::Windows), &libs).unwrap();

        assert!(libs.join("fmod/plugins/win_x64/fmod_haptics.dll").is_file());
        assert!(libs.join("fmod/plugins/win_x64/resonanceaudio.dll").is_file());
        assert!(!libs.join("fmod/plugins/win_x64/fmod_haptics").exists());
        assert_eq!(report.plugin_counts(), (2, 2));
    }

    #[test]
    fn test_empty_tree_copies_nothing() {
        let temp = TempDir::new().unwrap();
        let tree = temp.path().join("tree");
        fs::create_dir_all(&tree).unwrap();
        let libs = temp.path().join("libs");

        for sdk in [Sdk::Fmod, Sdk::Raylib] {
            let report = copy_components(&tree, sdk.profile(Platform::Linux), &libs).unwrap();
            assert_eq!(report.copied_files(), 0);
            assert_eq!(report.missing().count(), report.components.len());
            assert!(report.has_warnings());
        }
        assert!(!libs.exists());
    }

    #[test]
    fn test_missing_component_is_logged_as_warning() {
        crate::test_log::init();
        let temp = TempDir::new().unwrap();
        let tree = temp.path().join("tree");
        fs::create_dir_all(&tree).unwrap();

        let report =
            copy_components(&tree, Sdk::Raylib.profile(Platform::Linux), &temp.path().join("libs")).unwrap();

        assert_eq!(report.missing().count(), 2);
        let include = tree.join("include").display().to_string();
        assert!(crate::test_log::logged(log::Level::Warn, &["headers not found at", &include]));
    }

    #[test]
    fn test_raylib_searches_include_and_lib() {
        let temp = TempDir::new().unwrap();
        let tree = temp.path().join("tree");
        let libs = temp.path().join("libs");
        touch(&tree.join("raylib-5.5_macos/include/raylib.h"));
        touch(&tree.join("raylib-5.5_macos/include/raymath.h"));
        touch(&tree.join("raylib-5.5_macos/lib/libraylib.a"));

        let report = copy_components(&tree, Sdk::Raylib.profile(Platform::Mac), &libs).unwrap();

        assert!(libs.join("raylib/include/raylib.h").is_file());
        assert!(libs.join("raylib/include/raymath.h").is_file());
        assert!(libs.join("raylib/lib/mac/libraylib.a").is_file());
        assert_eq!(report.copied_files(), 3);
        assert!(!report.has_warnings());
    }
}
