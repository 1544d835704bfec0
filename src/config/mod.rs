// src/config/mod.rs

//! Configuration loading and validation for fireshell.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Read banner metadata from `package.json` (`metadata.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate references and resolve placeholders (`validate.rs`).

pub mod loader;
pub mod metadata;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use metadata::PackageMetadata;
pub use model::{
    BannerSection, ConfigFile, LiveReloadSection, PipelineConfig, ProjectSection, RawConfigFile,
    TaskConfig, WatchBindingConfig,
};
