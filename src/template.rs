// src/template.rs

//! `{{ key }}` placeholder templates.
//!
//! Used for three things:
//! - expanding `project.*` / `pkg.*` references in config paths at load time,
//! - rendering the banner from typed package metadata,
//! - rendering task command lines at dispatch time.
//!
//! Keys are dotted identifiers (`project.src`, `options.style`, `inputs`).
//! Rendering never guesses: an unresolved key is an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PackageMetadata;
use crate::errors::{FireshellError, Result};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("placeholder regex is valid")
});

/// Banner used when `[banner].template` is not set.
pub const DEFAULT_BANNER: &str = "/*!\n \
 * {{ pkg.name }}\n \
 * {{ pkg.title }}\n \
 * {{ pkg.url }}\n \
 * @author {{ pkg.author }}\n \
 * @version {{ pkg.version }}\n \
 * Copyright {{ pkg.copyright }}. {{ pkg.license }} licensed.\n \
 */\n";

/// A parsed template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute every placeholder using `lookup`.
    ///
    /// Fails with the offending key if `lookup` returns `None`.
    pub fn render<F>(&self, mut lookup: F) -> std::result::Result<String, String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::with_capacity(self.source.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.source) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&self.source[last..whole.start()]);
            match lookup(key.as_str()) {
                Some(value) => out.push_str(&value),
                None => return Err(key.as_str().to_string()),
            }
            last = whole.end();
        }

        out.push_str(&self.source[last..]);
        Ok(out)
    }
}

/// If `entry` consists of exactly one placeholder, return its key.
///
/// Used for list-valued references like `"{{ project.css }}"`, which expand
/// to several entries instead of being substituted inline.
pub fn sole_placeholder(entry: &str) -> Option<&str> {
    let caps = PLACEHOLDER.captures(entry.trim())?;
    let whole = caps.get(0)?;
    if whole.as_str().len() == entry.trim().len() {
        caps.get(1).map(|m| m.as_str())
    } else {
        None
    }
}

/// Render the banner header against typed package metadata.
///
/// Only `pkg.<field>` placeholders are allowed; any field the template uses
/// must be present in the metadata.
pub fn render_banner(template: &str, meta: &PackageMetadata) -> Result<String> {
    Template::new(template)
        .render(|key| {
            key.strip_prefix("pkg.")
                .and_then(|field| meta.field(field))
                .map(str::to_string)
        })
        .map_err(|key| {
            FireshellError::ConfigError(format!(
                "banner placeholder '{{{{ {key} }}}}' has no value in package metadata"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PackageMetadata {
        PackageMetadata {
            name: Some("fireshell".into()),
            title: Some("FireShell".into()),
            url: Some("http://getfireshell.com".into()),
            author: Some("Todd Motto".into()),
            version: Some("1.0.0".into()),
            copyright: Some("2014".into()),
            license: Some("MIT".into()),
        }
    }

    #[test]
    fn renders_with_and_without_spaces() {
        let t = Template::new("{{a}}-{{ b }}-{{  a  }}");
        let out = t
            .render(|k| match k {
                "a" => Some("1".into()),
                "b" => Some("2".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn render_reports_missing_key() {
        let t = Template::new("sass {{ flags }} {{ nope }}");
        let err = t.render(|k| (k == "flags").then(String::new)).unwrap_err();
        assert_eq!(err, "nope");
    }

    #[test]
    fn sole_placeholder_only_matches_whole_entry() {
        assert_eq!(sole_placeholder("{{ project.css }}"), Some("project.css"));
        assert_eq!(sole_placeholder(" {{project.js}} "), Some("project.js"));
        assert_eq!(sole_placeholder("{{ project.src }}/js/*.js"), None);
        assert_eq!(sole_placeholder("plain"), None);
    }

    #[test]
    fn default_banner_renders_every_field() {
        let banner = render_banner(DEFAULT_BANNER, &meta()).unwrap();
        assert!(banner.starts_with("/*!\n"));
        assert!(banner.contains(" * fireshell\n"));
        assert!(banner.contains(" * @author Todd Motto\n"));
        assert!(banner.contains(" * Copyright 2014. MIT licensed.\n"));
        assert!(banner.ends_with(" */\n"));
    }

    #[test]
    fn banner_with_missing_field_is_config_error() {
        let mut m = meta();
        m.version = None;
        let err = render_banner("v{{ pkg.version }}", &m).unwrap_err();
        assert!(matches!(err, FireshellError::ConfigError(msg) if msg.contains("pkg.version")));
    }

    #[test]
    fn banner_rejects_non_pkg_keys() {
        let err = render_banner("{{ project.src }}", &meta()).unwrap_err();
        assert!(matches!(err, FireshellError::ConfigError(_)));
    }
}
