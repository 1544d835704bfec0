// src/exec/inputs.rs

//! Expansion of task input globs against the project root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::watch::path_utils::trim_current_dir;

/// True if `pattern` contains glob syntax.
pub fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Compile a glob where `*` stays within one path segment and `**` crosses
/// directories.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(glob.compile_matcher())
}

/// Leading path segments of `pattern` that contain no glob syntax.
///
/// Walking starts there instead of at the project root.
fn literal_prefix(pattern: &str) -> PathBuf {
    pattern
        .split('/')
        .take_while(|segment| !has_glob_meta(segment))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Expand input patterns into root-relative paths (forward slashes).
///
/// - Glob patterns expand to the sorted list of matching files.
/// - Literal paths pass through even if missing, so the tool reports it.
/// - A leading `./` is dropped.
/// - Duplicates are dropped, first occurrence wins.
pub fn expand_inputs(fs: &dyn FileSystem, root: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();

    for pattern in patterns {
        let pattern = trim_current_dir(pattern);
        if !has_glob_meta(pattern) {
            if !out.iter().any(|p| p == pattern) {
                out.push(pattern.to_string());
            }
            continue;
        }

        let matches = matching_files(fs, root, pattern)?;
        if matches.is_empty() {
            warn!(pattern = %pattern, "input pattern matched no files");
        }
        for rel in matches {
            if !out.contains(&rel) {
                out.push(rel);
            }
        }
    }

    Ok(out)
}

/// All files under `root` matching a single glob, sorted.
pub fn matching_files(fs: &dyn FileSystem, root: &Path, pattern: &str) -> Result<Vec<String>> {
    walk_matches(fs, root, pattern, false)
}

/// Files and directories under `root` matching a single glob, sorted.
///
/// A matched directory is returned as one entry and not descended into.
pub fn matching_paths(fs: &dyn FileSystem, root: &Path, pattern: &str) -> Result<Vec<String>> {
    walk_matches(fs, root, pattern, true)
}

/// Directory symlinks are never followed, so link cycles cannot repeat files.
fn walk_matches(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &str,
    include_dirs: bool,
) -> Result<Vec<String>> {
    let pattern = trim_current_dir(pattern);
    let matcher = compile_glob(pattern)?;
    let base = root.join(literal_prefix(pattern));
    if !fs.is_dir(&base) {
        debug!(pattern = %pattern, base = ?base, "glob base directory does not exist");
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    let mut stack = vec![base];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let rel_str = rel.to_string_lossy().replace('\\', "/");

            if fs.is_dir(&path) {
                if fs.is_symlink(&path) {
                    debug!(path = %rel_str, "not following directory symlink");
                } else if include_dirs && matcher.is_match(&rel_str) {
                    found.push(rel_str);
                } else {
                    stack.push(path);
                }
            } else if fs.is_file(&path) && matcher.is_match(&rel_str) {
                found.push(rel_str);
            }
        }
    }

    found.sort();
    Ok(found)
}
