// src/config/metadata.rs

//! Typed project metadata used to render the banner.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{FireshellError, Result};

/// Project metadata, from `[package]` and/or `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

impl PackageMetadata {
    /// Look up a field by its banner key (`pkg.<field>`).
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "name" => &self.name,
            "title" => &self.title,
            "url" => &self.url,
            "author" => &self.author,
            "version" => &self.version,
            "copyright" => &self.copyright,
            "license" => &self.license,
            _ => return None,
        };
        value.as_deref()
    }

    /// Field-wise merge where `self` wins over `base`.
    pub fn merged_over(self, base: PackageMetadata) -> PackageMetadata {
        PackageMetadata {
            name: self.name.or(base.name),
            title: self.title.or(base.title),
            url: self.url.or(base.url),
            author: self.author.or(base.author),
            version: self.version.or(base.version),
            copyright: self.copyright.or(base.copyright),
            license: self.license.or(base.license),
        }
    }
}

/// `author` in `package.json`: either `"Name <mail>"` or `{ "name": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageJsonPerson {
    Plain(String),
    Object { name: String },
}

/// `license` in `package.json`: SPDX string or legacy `{ "type": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageJsonLicense {
    Plain(String),
    Object {
        #[serde(rename = "type")]
        kind: String,
    },
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    title: Option<String>,
    url: Option<String>,
    homepage: Option<String>,
    author: Option<PackageJsonPerson>,
    version: Option<String>,
    copyright: Option<String>,
    license: Option<PackageJsonLicense>,
}

impl From<PackageJson> for PackageMetadata {
    fn from(pkg: PackageJson) -> Self {
        PackageMetadata {
            name: pkg.name,
            title: pkg.title,
            url: pkg.url.or(pkg.homepage),
            author: pkg.author.map(|a| match a {
                PackageJsonPerson::Plain(s) => s,
                PackageJsonPerson::Object { name } => name,
            }),
            version: pkg.version,
            copyright: pkg.copyright,
            license: pkg.license.map(|l| match l {
                PackageJsonLicense::Plain(s) => s,
                PackageJsonLicense::Object { kind } => kind,
            }),
        }
    }
}

/// Parse banner metadata out of `package.json` contents.
pub fn parse_package_json(contents: &str) -> Result<PackageMetadata> {
    let pkg: PackageJson = serde_json::from_str(contents)?;
    Ok(pkg.into())
}

/// Read and parse a `package.json` file.
pub fn load_package_json(path: &Path) -> Result<PackageMetadata> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        FireshellError::ConfigError(format!("cannot read package metadata {:?}: {e}", path))
    })?;
    parse_package_json(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_author_and_legacy_license() {
        let meta = parse_package_json(
            r#"{
                "name": "fireshell",
                "version": "2.0.1",
                "homepage": "http://getfireshell.com",
                "author": { "name": "Todd Motto", "email": "todd@example.com" },
                "license": { "type": "MIT" },
                "devDependencies": { "grunt": "~0.4.1" }
            }"#,
        )
        .unwrap();

        assert_eq!(meta.name.as_deref(), Some("fireshell"));
        assert_eq!(meta.url.as_deref(), Some("http://getfireshell.com"));
        assert_eq!(meta.author.as_deref(), Some("Todd Motto"));
        assert_eq!(meta.license.as_deref(), Some("MIT"));
        assert_eq!(meta.title, None);
    }

    #[test]
    fn toml_values_override_package_json() {
        let from_json = PackageMetadata {
            name: Some("from-json".into()),
            version: Some("1.0.0".into()),
            ..Default::default()
        };
        let from_toml = PackageMetadata {
            name: Some("from-toml".into()),
            ..Default::default()
        };

        let merged = from_toml.merged_over(from_json);
        assert_eq!(merged.name.as_deref(), Some("from-toml"));
        assert_eq!(merged.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn unknown_field_has_no_value() {
        let meta = PackageMetadata {
            name: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(meta.field("name"), Some("x"));
        assert_eq!(meta.field("homepage"), None);
        assert_eq!(meta.field("version"), None);
    }
}
