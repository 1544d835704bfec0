// src/exec/banner.rs

use std::path::Path;

use anyhow::Result;

use crate::fs::FileSystem;

/// Prepend `banner` to the file at `path`.
///
/// Returns `false` without writing if the file already starts with the
/// banner (tools that honour a banner option themselves, or a re-run on an
/// unchanged output).
pub fn prepend_banner(fs: &dyn FileSystem, path: &Path, banner: &str) -> Result<bool> {
    let contents = fs.read_to_string(path)?;
    if contents.starts_with(banner) {
        return Ok(false);
    }

    let mut out = String::with_capacity(banner.len() + contents.len());
    out.push_str(banner);
    out.push_str(&contents);
    fs.write(path, out.as_bytes())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn prepends_once() {
        let fs = MockFileSystem::new();
        fs.add_file("./dist/js/scripts.min.js", "var a=1;");
        let path = Path::new("./dist/js/scripts.min.js");

        assert!(prepend_banner(&fs, path, "/*! demo */\n").unwrap());
        assert!(!prepend_banner(&fs, path, "/*! demo */\n").unwrap());
        assert_eq!(fs.contents(path).as_deref(), Some("/*! demo */\nvar a=1;"));
    }
}
