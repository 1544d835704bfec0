// src/types.rs

//! Enumerated task identifiers.
//!
//! Tasks are addressed as `kind` or `kind:profile` (e.g. `sass:dist`,
//! `webpack:dev`, `uglify`). Both halves are closed sets, so a typo in the
//! config is rejected while loading rather than when the task is dispatched.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The external tool family a task delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Sass,
    Compass,
    Bower,
    Postcss,
    Autoprefixer,
    Cssmin,
    Webpack,
    Concat,
    Jshint,
    Uglify,
    /// Built-in: delete generated files. No external tool.
    Clean,
}

impl TaskKind {
    pub const ALL: [TaskKind; 11] = [
        TaskKind::Sass,
        TaskKind::Compass,
        TaskKind::Bower,
        TaskKind::Postcss,
        TaskKind::Autoprefixer,
        TaskKind::Cssmin,
        TaskKind::Webpack,
        TaskKind::Concat,
        TaskKind::Jshint,
        TaskKind::Uglify,
        TaskKind::Clean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Sass => "sass",
            TaskKind::Compass => "compass",
            TaskKind::Bower => "bower",
            TaskKind::Postcss => "postcss",
            TaskKind::Autoprefixer => "autoprefixer",
            TaskKind::Cssmin => "cssmin",
            TaskKind::Webpack => "webpack",
            TaskKind::Concat => "concat",
            TaskKind::Jshint => "jshint",
            TaskKind::Uglify => "uglify",
            TaskKind::Clean => "clean",
        }
    }

    /// Command template used when a task does not set `cmd`.
    ///
    /// `None` for built-in kinds.
    pub fn default_command(&self) -> Option<&'static str> {
        match self {
            TaskKind::Sass => Some("sass {{ flags }} {{ inputs }} {{ output }}"),
            TaskKind::Compass => Some("compass compile {{ flags }}"),
            TaskKind::Bower => Some("bower install {{ flags }}"),
            TaskKind::Postcss => Some("postcss {{ inputs }} {{ flags }} -o {{ output }}"),
            TaskKind::Autoprefixer => {
                Some("postcss --use autoprefixer {{ inputs }} {{ flags }} -o {{ output }}")
            }
            TaskKind::Cssmin => Some("cleancss {{ flags }} -o {{ output }} {{ inputs }}"),
            TaskKind::Webpack => Some("webpack {{ flags }} {{ inputs }} -o {{ output }}"),
            TaskKind::Concat => Some("cat {{ inputs }} > {{ output }}"),
            TaskKind::Jshint => Some("jshint {{ flags }} {{ inputs }}"),
            TaskKind::Uglify => Some("uglifyjs {{ inputs }} {{ flags }} -o {{ output }}"),
            TaskKind::Clean => None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, TaskKind::Clean)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TaskKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = TaskKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown task kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Build profile half of a task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Dev,
    Dist,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Dev => "dev",
            Profile::Dist => "dist",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" => Ok(Profile::Dev),
            "dist" => Ok(Profile::Dist),
            other => Err(format!(
                "unknown task profile '{other}' (expected \"dev\" or \"dist\")"
            )),
        }
    }
}

/// Identifier of a task in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TaskId {
    pub kind: TaskKind,
    pub profile: Option<Profile>,
}

impl TaskId {
    pub fn new(kind: TaskKind, profile: Option<Profile>) -> Self {
        Self { kind, profile }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.profile {
            Some(p) => write!(f, "{}:{}", self.kind, p.as_str()),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("task id must not be empty".to_string());
        }
        match s.split_once(':') {
            Some((kind, profile)) => Ok(TaskId {
                kind: kind.parse()?,
                profile: Some(profile.parse()?),
            }),
            None => Ok(TaskId {
                kind: s.parse()?,
                profile: None,
            }),
        }
    }
}

impl TryFrom<String> for TaskId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_and_profile() {
        let id: TaskId = "sass:dist".parse().unwrap();
        assert_eq!(id, TaskId::new(TaskKind::Sass, Some(Profile::Dist)));
        assert_eq!(id.to_string(), "sass:dist");
    }

    #[test]
    fn parses_bare_kind() {
        let id: TaskId = "uglify".parse().unwrap();
        assert_eq!(id, TaskId::new(TaskKind::Uglify, None));
        assert_eq!(id.to_string(), "uglify");
    }

    #[test]
    fn rejects_unknown_kind_and_profile() {
        let err = "grunt:dev".parse::<TaskId>().unwrap_err();
        assert!(err.contains("unknown task kind 'grunt'"));

        let err = "sass:prod".parse::<TaskId>().unwrap_err();
        assert!(err.contains("unknown task profile 'prod'"));
    }

    #[test]
    fn only_clean_is_builtin() {
        for kind in TaskKind::ALL {
            assert_eq!(kind.is_builtin(), kind.default_command().is_none());
        }
        assert!(TaskKind::Clean.is_builtin());
    }
}
