use anyhow::{Context, Result};
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::{
    constants::{EXCLUDED_DIRS, JS_TS_EXTENSIONS},
    fs::{DirEntry, FileSystem},
};

pub fn is_js_or_ts_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| JS_TS_EXTENSIONS.contains(&ext))
}

/// Recursively lists JS/TS files under `dir`, skipping [`EXCLUDED_DIRS`].
///
/// The order of the returned paths follows the directory listing and is not stable
/// across platforms.
pub fn collect_source_files(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", dir.display());
    let entries =
        fs.read_dir(dir).with_context(|| format!("Failed to list directory {}", dir.display()))?;

    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = Vec::new();
    push_entries(dir, entries, &mut files, &mut pending);

    while let Some(sub) = pending.pop() {
        match fs.read_dir(&sub) {
            Ok(entries) => push_entries(&sub, entries, &mut files, &mut pending),
            Err(e) => warn!("Skipping unreadable directory {}: {}", sub.display(), e),
        }
    }

    debug!("Collected {} source files", files.len());
    Ok(files)
}

fn push_entries(
    dir: &Path,
    entries: Vec<DirEntry>,
    files: &mut Vec<PathBuf>,
    pending: &mut Vec<PathBuf>,
) {
    for entry in entries {
        let path = dir.join(&entry.name);
        if entry.is_dir {
            if EXCLUDED_DIRS.contains(&entry.name.as_str()) {
                trace!("Skipping excluded directory: {}", path.display());
                continue;
            }
            pending.push(path);
        } else if is_js_or_ts_file(&path) {
            trace!("Found source file: {}", path.display());
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsFileSystem;
    use std::{collections::HashSet, fs};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_is_js_or_ts_file() {
        assert!(is_js_or_ts_file(Path::new("a/b.tsx")));
        assert!(is_js_or_ts_file(Path::new("b.js")));
        assert!(!is_js_or_ts_file(Path::new("b.css")));
        assert!(!is_js_or_ts_file(Path::new("b.d")));
        assert!(!is_js_or_ts_file(Path::new("Makefile")));
    }

    #[test]
    fn test_collects_nested_sources() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let page = create_test_file(root, "app/page.tsx", "");
        let button = create_test_file(root, "app/components/Button.jsx", "");
        let util = create_test_file(root, "lib/util.ts", "");
        let legacy = create_test_file(root, "legacy.js", "");
        create_test_file(root, "app/styles/page.module.css", "");
        create_test_file(root, "README.md", "");

        let files: HashSet<PathBuf> =
            collect_source_files(&OsFileSystem, root).unwrap().into_iter().collect();
        assert_eq!(files, HashSet::from([page, button, util, legacy]));
    }

    #[test]
    fn test_prunes_excluded_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let index = create_test_file(root, "src/index.ts", "");
        create_test_file(root, "node_modules/react/index.js", "");
        create_test_file(root, ".git/hooks/pre-commit.js", "");
        create_test_file(root, "dist/bundle.js", "");
        let nested_dist = create_test_file(root, "src/distribution/x.ts", "");

        let files: HashSet<PathBuf> =
            collect_source_files(&OsFileSystem, root).unwrap().into_iter().collect();
        assert_eq!(files, HashSet::from([index, nested_dist]));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_source_files(&OsFileSystem, &temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_source_files(&OsFileSystem, temp_dir.path()).unwrap().is_empty());
    }
}
