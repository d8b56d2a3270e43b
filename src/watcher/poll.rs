use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Modification time and size of a file at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub modified: SystemTime,
    pub len: u64,
}

impl FileStamp {
    pub fn read(path: &Path) -> io::Result<FileStamp> {
        let metadata = fs::metadata(path)?;

        Ok(FileStamp {
            modified: metadata.modified()?,
            len: metadata.len(),
        })
    }
}

/// What a single poll saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Same modification time as the committed stamp.
    Unchanged,
    /// Modified, but empty: a writer is still busy with it.
    Truncated(FileStamp),
    /// Modified and non-empty.
    Changed(FileStamp),
}

/// Polls a single file for modification.
///
/// Nothing is remembered on its own, a stamp only becomes the reference for
/// later polls once it is [committed](PollWatcher::commit).
#[derive(Debug)]
pub struct PollWatcher {
    path: PathBuf,
    last: Option<FileStamp>,
}

impl PollWatcher {
    pub fn new(path: PathBuf) -> PollWatcher {
        PollWatcher { path, last: None }
    }

    pub fn poll(&self) -> io::Result<Poll> {
        let stamp = FileStamp::read(&self.path)?;

        if self.last.is_some_and(|last| last.modified == stamp.modified) {
            return Ok(Poll::Unchanged);
        }

        if stamp.len == 0 {
            Ok(Poll::Truncated(stamp))
        } else {
            Ok(Poll::Changed(stamp))
        }
    }

    pub fn commit(&mut self, stamp: FileStamp) {
        self.last = Some(stamp);
    }

    /// Drops the committed stamp so the next non-empty poll reports a change.
    pub fn forget(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<FileStamp> {
        self.last
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use super::*;

    fn touch(path: &Path, contents: &[u8], secs: u64) {
        fs::write(path, contents).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn first_poll_reports_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.so");
        touch(&path, b"abc", 1_000);

        let watcher = PollWatcher::new(path);

        match watcher.poll().unwrap() {
            Poll::Changed(stamp) => assert_eq!(stamp.len, 3),
            other => panic!("expected a change, got {other:?}"),
        }
    }

    #[test]
    fn committed_stamp_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.so");
        touch(&path, b"abc", 1_000);
        let mut watcher = PollWatcher::new(path.clone());

        let Poll::Changed(stamp) = watcher.poll().unwrap() else {
            panic!("expected a change");
        };
        watcher.commit(stamp);

        assert_eq!(watcher.poll().unwrap(), Poll::Unchanged);

        // Same time, different size: still unchanged.
        touch(&path, b"abcdef", 1_000);
        assert_eq!(watcher.poll().unwrap(), Poll::Unchanged);
    }

    #[test]
    fn empty_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.so");
        touch(&path, b"abc", 1_000);
        let mut watcher = PollWatcher::new(path.clone());
        let Poll::Changed(stamp) = watcher.poll().unwrap() else {
            panic!("expected a change");
        };
        watcher.commit(stamp);

        touch(&path, b"", 2_000);
        assert!(matches!(watcher.poll().unwrap(), Poll::Truncated(_)));

        touch(&path, b"abcd", 3_000);
        assert!(matches!(
            watcher.poll().unwrap(),
            Poll::Changed(FileStamp { len: 4, .. })
        ));
    }

    #[test]
    fn forget_reports_change_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.so");
        touch(&path, b"abc", 1_000);
        let mut watcher = PollWatcher::new(path);
        let Poll::Changed(stamp) = watcher.poll().unwrap() else {
            panic!("expected a change");
        };
        watcher.commit(stamp);

        watcher.forget();

        assert_eq!(watcher.last(), None);
        assert_eq!(watcher.poll().unwrap(), Poll::Changed(stamp));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = PollWatcher::new(dir.path().join("missing.so"));

        assert!(watcher.poll().is_err());
    }
}
