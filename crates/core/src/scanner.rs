//! Non-recursive folder listing with an extension allow-list.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// List the regular files directly inside `folder` whose lowercase extension
/// is in `extensions`, as absolute paths. A missing or non-directory path is
/// "nothing to do" and yields an empty list, never an error; unreadable
/// entries are skipped.
pub fn list_folder(folder: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let folder = std::path::absolute(folder).unwrap_or_else(|_| folder.to_path_buf());
    if !folder.is_dir() {
        debug!(folder = %folder.display(), "scan target is not a directory, nothing to do");
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&folder).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)));
        if matches {
            files.push(entry.into_path());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_EXTENSIONS;

    #[test]
    fn test_missing_folder_is_empty() {
        assert!(list_folder(Path::new("/nonexistent/folder"), DEFAULT_EXTENSIONS).is_empty());
    }

    #[test]
    fn test_file_path_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.png");
        std::fs::write(&file, b"x").unwrap();
        assert!(list_folder(&file, DEFAULT_EXTENSIONS).is_empty());
    }

    #[test]
    fn test_filters_by_extension_case_insensitively() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.JPG", "c.txt", "d.jpeg", "noext"] {
            std::fs::write(tmp.path().join(name), b"x").unwrap();
        }
        let files = list_folder(tmp.path(), DEFAULT_EXTENSIONS);
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "d.jpeg"]);
    }

    #[test]
    fn test_does_not_recurse() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("top.png"), b"x").unwrap();
        let sub = tmp.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("nested.png"), b"x").unwrap();

        let files = list_folder(tmp.path(), DEFAULT_EXTENSIONS);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.png"));
    }

    #[test]
    fn test_paths_are_absolute() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.gif"), b"x").unwrap();
        for file in list_folder(tmp.path(), DEFAULT_EXTENSIONS) {
            assert!(file.is_absolute());
        }
    }
}
