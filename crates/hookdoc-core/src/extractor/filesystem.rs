//! Filesystem enumeration for the extraction pipeline.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{HookdocError, HookdocResult};

/// The recognized source extension, matched case-insensitively.
pub const SOURCE_EXTENSION: &str = "php";

/// Recursively collect all source files under the given root, in
/// deterministic (name-sorted) order.
///
/// Fails with an invalid-input error when the root is not a directory, and
/// with a traversal error when any subdirectory cannot be descended into —
/// no partial file list is returned.
pub fn collect_source_files(root: &Path) -> HookdocResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(HookdocError::InvalidInput(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| HookdocError::Traversal(e.to_string()))?;
        if entry.file_type().is_file() && has_source_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), files = files.len(), "collected source files");
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
        .unwrap_or(false)
}

/// Render a path relative to the project root. A path outside the root is
/// returned unchanged.
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, "<?php\n").unwrap();
    }

    #[test]
    fn test_collects_only_source_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("includes")).unwrap();
        touch(&root.join("plugin.php"));
        touch(&root.join("includes/registry.php"));
        touch(&root.join("readme.txt"));
        std::fs::write(root.join("style.css"), "body {}\n").unwrap();

        let files = collect_source_files(root).unwrap();
        let names: Vec<String> = files.iter().map(|p| relative_path(p, root)).collect();
        assert_eq!(names, vec!["includes/registry.php", "plugin.php"]);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Legacy.PHP"));
        let files = collect_source_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_non_directory_root_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plugin.php");
        touch(&file);
        let err = collect_source_files(&file).unwrap_err();
        assert!(matches!(err, HookdocError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_root_is_invalid_input() {
        let err = collect_source_files(Path::new("/nonexistent/hookdoc-test")).unwrap_err();
        assert!(matches!(err, HookdocError::InvalidInput(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_traversal_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        touch(&locked.join("hidden.php"));
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        if std::fs::read_dir(&locked).is_ok() {
            // Permission bits do not apply (e.g. running as root); there is
            // no descent failure to observe.
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = collect_source_files(dir.path());
        // Restore permissions so the tempdir can be cleaned up.
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(HookdocError::Traversal(_)) => {}
            other => panic!("expected traversal error, got {other:?}"),
        }
    }

    #[test]
    fn test_relative_path_outside_root_unchanged() {
        assert_eq!(
            relative_path(Path::new("/elsewhere/a.php"), Path::new("/project")),
            "/elsewhere/a.php"
        );
    }
}
