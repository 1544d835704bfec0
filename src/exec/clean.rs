// src/exec/clean.rs

//! Built-in `clean` task: delete generated files before a deploy.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::exec::inputs::{has_glob_meta, matching_paths};
use crate::fs::FileSystem;
use crate::watch::path_utils::trim_current_dir;

/// Delete every path or glob match in `paths` (relative to `root`).
///
/// Missing paths are skipped. Directories, whether named literally or
/// matched by a glob, are removed recursively. Returns the number of entries
/// removed.
pub fn remove_paths(fs: &dyn FileSystem, root: &Path, paths: &[String]) -> Result<usize> {
    let mut removed = 0;

    for entry in paths {
        let entry = trim_current_dir(entry);
        let targets = if has_glob_meta(entry) {
            matching_paths(fs, root, entry)?
        } else {
            vec![entry.to_string()]
        };

        for rel in targets {
            let path = root.join(&rel);
            if fs.is_dir(&path) {
                fs.remove_dir_all(&path)?;
            } else if fs.exists(&path) {
                fs.remove_file(&path)?;
            } else {
                debug!(path = %rel, "clean: nothing to remove");
                continue;
            }
            info!(path = %rel, "clean: removed");
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn removes_files_dirs_and_globs() {
        let fs = MockFileSystem::new();
        fs.add_file("./dist/css/styles.unprefixed.css", "a");
        fs.add_file("./dist/css/styles.prefixed.css", "b");
        fs.add_file("./dist/css/styles.min.css", "c");
        fs.add_file("./dist/tmp/one.map", "d");
        fs.add_file("./dist/tmp/two.map", "e");

        let removed = remove_paths(
            &fs,
            Path::new("."),
            &[
                "dist/css/*.*prefixed.css".to_string(),
                "dist/tmp".to_string(),
                "dist/never-existed.css".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(removed, 3);
        assert!(!fs.exists(Path::new("./dist/css/styles.unprefixed.css")));
        assert!(!fs.exists(Path::new("./dist/css/styles.prefixed.css")));
        assert!(!fs.exists(Path::new("./dist/tmp/one.map")));
        assert!(!fs.exists(Path::new("./dist/tmp")));
        assert!(fs.exists(Path::new("./dist/css/styles.min.css")));
    }

    #[test]
    fn globs_match_directories_too() {
        let fs = MockFileSystem::new();
        fs.add_file("./dist/tmp-css/a.map", "a");
        fs.add_file("./dist/tmp-js/b.map", "b");
        fs.add_file("./dist/tmp.txt", "c");
        fs.add_file("./dist/keep/styles.css", "d");

        let removed = remove_paths(&fs, Path::new("."), &["dist/tmp*".to_string()]).unwrap();

        assert_eq!(removed, 3);
        assert!(!fs.exists(Path::new("./dist/tmp-css")));
        assert!(!fs.exists(Path::new("./dist/tmp-js/b.map")));
        assert!(!fs.exists(Path::new("./dist/tmp.txt")));
        assert!(fs.exists(Path::new("./dist/keep/styles.css")));
    }

    #[test]
    fn dot_slash_entries_are_cleaned() {
        let fs = MockFileSystem::new();
        fs.add_file("./dist/css/styles.unprefixed.css", "a");
        fs.add_file("./dist/css/styles.min.css", "b");
        fs.add_file("./dist/js/scripts.js", "c");

        let removed = remove_paths(
            &fs,
            Path::new("."),
            &["./dist/css/*.unprefixed.css".to_string(), "./dist/js".to_string()],
        )
        .unwrap();

        assert_eq!(removed, 2);
        assert!(!fs.exists(Path::new("./dist/css/styles.unprefixed.css")));
        assert!(!fs.exists(Path::new("./dist/js")));
        assert!(fs.exists(Path::new("./dist/css/styles.min.css")));
    }
}
