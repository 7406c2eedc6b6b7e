//! Filesystem helpers shared by the extractors and the installer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively copy `src` into `dst`, merging with whatever `dst` already contains.
///
/// Existing files with the same relative path are overwritten; other existing files are
/// left alone. Returns the number of files copied.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use sdkpull_core::util::merge_copy_dir;
///
/// let copied = merge_copy_dir(Path::new("/tmp/sdk/api/core/inc"), Path::new("libs/fmod/core/inc"))?;
/// println!("copied {copied} files");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn merge_copy_dir(src: &Path, dst: &Path) -> io::Result<u64> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            copied += 1;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy a single file into `dst_dir`, keeping only its file name.
///
/// Returns the path of the new file.
pub fn copy_file_into(src: &Path, dst_dir: &Path) -> io::Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Not a file path: {}", src.display()),
        )
    })?;

    fs::create_dir_all(dst_dir)?;
    let target = dst_dir.join(name);
    fs::copy(src, &target)?;
    Ok(target)
}

/// Find the shallowest directory called `name` below `root` (excluding `root` itself).
///
/// Ties at the same depth are broken by path order, so the result does not depend on the
/// order the filesystem lists entries in.
pub fn find_dir_named(root: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == name)
        .min_by(|a, b| a.depth().cmp(&b.depth()).then_with(|| a.path().cmp(b.path())))
        .map(|e| e.into_path())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    // Library folders ship versioned .so/.dylib symlinks; keep them as links.
    let target = fs::read_link(src)?;
    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst)?;
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_merge_copy_overwrites_and_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");

        write(&src.join("fmod.h"), "new");
        write(&src.join("nested/fmod_common.h"), "common");
        write(&dst.join("fmod.h"), "old");
        write(&dst.join("stale.h"), "stale");

        let copied = merge_copy_dir(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("fmod.h")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dst.join("nested/fmod_common.h")).unwrap(), "common");
        assert_eq!(fs::read_to_string(dst.join("stale.h")).unwrap(), "stale");
    }

    #[test]
    fn test_merge_copy_empty_source() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();

        let copied = merge_copy_dir(&src, &temp.path().join("dst")).unwrap();
        assert_eq!(copied, 0);
        assert!(temp.path().join("dst").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_merge_copy_keeps_symlinks() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("libfmod.so.13.12"), "binary");
        std::os::unix::fs::symlink("libfmod.so.13.12", src.join("libfmod.so")).unwrap();

        let dst = temp.path().join("dst");
        merge_copy_dir(&src, &dst).unwrap();
        // A second merge must replace the existing link rather than fail.
        let copied = merge_copy_dir(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_link(dst.join("libfmod.so")).unwrap(),
            PathBuf::from("libfmod.so.13.12")
        );
    }

    #[test]
    fn test_copy_file_into_flattens() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("plugins/resonance_audio/lib/x64/resonanceaudio.dll");
        write(&src, "dll");

        let target = copy_file_into(&src, &temp.path().join("out")).unwrap();

        assert_eq!(target, temp.path().join("out/resonanceaudio.dll"));
        assert_eq!(fs::read_to_string(target).unwrap(), "dll");
    }

    #[test]
    fn test_find_dir_named_prefers_shallowest() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/b/c/api")).unwrap();
        fs::create_dir_all(temp.path().join("z/api")).unwrap();

        let found = find_dir_named(temp.path(), "api").unwrap();
        assert_eq!(found, temp.path().join("z/api"));
    }

    #[test]
    fn test_find_dir_named_ignores_files() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("lib"), "not a dir");
        assert_eq!(find_dir_named(temp.path(), "lib"), None);

        fs::create_dir_all(temp.path().join("pkg/lib")).unwrap();
        assert_eq!(find_dir_named(temp.path(), "lib"), Some(temp.path().join("pkg/lib")));
    }
}
