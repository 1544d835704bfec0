// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::metadata::load_package_json;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** check task
/// references or resolve placeholders. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Merges `package.json` metadata (if `[project].package_json` is set)
///   under the `[package]` section.
/// - Checks task ids, pipeline/binding references and placeholders.
///
/// The returned `ConfigFile` is immutable and is what the registry, the
/// dispatcher and the watch loop are built from.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw_config = load_from_path(path)?;

    if let Some(pkg_path) = raw_config.project.package_json.clone() {
        let pkg_path = config_dir(path).join(pkg_path);
        debug!(path = ?pkg_path, "loading package metadata");
        let from_json = load_package_json(&pkg_path)?;
        raw_config.package = raw_config.package.merged_over(from_json);
    }

    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
