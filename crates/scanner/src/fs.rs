use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Filesystem operations the organizer needs.
pub trait FileSystem {
    /// Raw entry names directly inside `dir`, sorted.
    ///
    /// Names are returned as the OS reports them so entries that are not
    /// valid UTF-8 can still be moved and renamed.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let mut names: Vec<OsString> = std::fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.file_name())
            .collect();
        names.sort();
        Ok(names)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_dir(dir)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_dir_is_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.mkv", "a.mkv", "Season 01", "c.srt"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }

        let names = LocalFs.list_dir(tmp.path()).unwrap();
        assert_eq!(names, vec!["Season 01", "a.mkv", "b.mkv", "c.srt"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_dir_keeps_raw_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"Show 0\xff2.mkv");
        fs::write(tmp.path().join(raw), "").unwrap();

        let names = LocalFs.list_dir(tmp.path()).unwrap();
        assert_eq!(names, vec![raw.to_os_string()]);
        assert!(tmp.path().join(&names[0]).is_file());
    }

    #[test]
    fn list_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(LocalFs.list_dir(&tmp.path().join("missing")).is_err());
    }
}
