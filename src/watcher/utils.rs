use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The private copy of `path` that actually gets loaded: `path` with `suffix`
/// appended to its file name.
///
/// A bare file name is anchored to the current directory, otherwise the
/// platform loader would look for it in the system library paths.
pub fn shadow_path(path: &Path, suffix: &OsStr) -> PathBuf {
    let mut shadow = path.as_os_str().to_os_string();
    shadow.push(suffix);
    let shadow = PathBuf::from(shadow);

    let mut components = shadow.components();
    let bare = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if bare {
        Path::new(".").join(shadow)
    } else {
        shadow
    }
}

/// Replaces `to` with a byte-for-byte copy of `from`, returning the number of
/// bytes copied.
///
/// The old file is removed instead of overwritten so a library that still maps
/// it keeps its pages.
pub fn snapshot(from: &Path, to: &Path) -> io::Result<u64> {
    match fs::remove_file(to) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    fs::copy(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_suffix_to_file_name() {
        assert_eq!(
            shadow_path(Path::new("/tmp/build/libgame.so"), OsStr::new("_copy")),
            PathBuf::from("/tmp/build/libgame.so_copy")
        );
        assert_eq!(
            shadow_path(Path::new("target/debug/game.dll"), OsStr::new(".hot")),
            PathBuf::from("target/debug/game.dll.hot")
        );
    }

    #[test]
    fn anchors_bare_file_name() {
        assert_eq!(
            shadow_path(Path::new("libgame.so"), OsStr::new("_copy")),
            PathBuf::from("./libgame.so_copy")
        );
    }

    #[test]
    fn snapshot_replaces_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("lib.so");
        let to = dir.path().join("lib.so_copy");
        fs::write(&from, b"new contents").unwrap();
        fs::write(&to, b"a much longer stale copy").unwrap();

        let copied = snapshot(&from, &to).unwrap();

        assert_eq!(copied, 12);
        assert_eq!(fs::read(&to).unwrap(), b"new contents");
    }

    #[test]
    fn snapshot_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let result = snapshot(&dir.path().join("missing.so"), &dir.path().join("copy"));

        assert!(result.is_err());
    }
}
