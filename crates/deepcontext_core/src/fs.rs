use std::{fs, io, path::Path};

/// A single entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// File-system primitives the analyzer needs.
///
/// Everything that touches the disk goes through this trait, so the resolver and the
/// traversal can run against any backing store. Implementations must be shareable
/// across rayon worker threads.
pub trait FileSystem: Send + Sync {
    /// Invalid UTF-8 is replaced with U+FFFD rather than reported as an error.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Any error while checking is reported as "does not exist".
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for dent in fs::read_dir(path)? {
            let dent = dent?;
            let is_dir = dent.file_type()?.is_dir();
            let name = dent.file_name().to_string_lossy().into_owned();
            entries.push(DirEntry { name, is_dir });
        }
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_reports_kinds() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.ts"), "").unwrap();

        let mut entries = OsFileSystem.read_dir(root).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntry { name: "a.ts".to_string(), is_dir: false },
                DirEntry { name: "sub".to_string(), is_dir: true },
            ]
        );
    }

    #[test]
    fn test_exists_and_is_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.ts"), "").unwrap();

        assert!(OsFileSystem.exists(&root.join("a.ts")));
        assert!(!OsFileSystem.is_dir(&root.join("a.ts")));
        assert!(OsFileSystem.is_dir(root));
        assert!(!OsFileSystem.exists(&root.join("missing.ts")));
    }

    #[test]
    fn test_read_latin1_file_is_lossy() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.js");
        fs::write(&path, b"// caf\xe9\nimport './x';").unwrap();

        let content = OsFileSystem.read_to_string(&path).unwrap();
        assert_eq!(content, "// caf\u{FFFD}\nimport './x';");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = OsFileSystem.read_to_string(&temp_dir.path().join("nope.ts")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
