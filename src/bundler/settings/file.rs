//! TOML settings files.
//!
//! ```toml
//! [requirejs]
//! cachedir = "/var/cache/webassets"
//! config_file = "requirejs.conf.js"
//! passthrough_extensions = "html txt"
//! "path.nodejs" = "/usr/bin/node"
//! ```

use super::SettingsBuilder;
use crate::bundler::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    requirejs: RequireJsSection,
}

/// The `[requirejs]` table.
#[derive(Debug, Default, Deserialize)]
struct RequireJsSection {
    #[serde(default, alias = "cachedir")]
    cache_directory: Option<PathBuf>,

    #[serde(default, alias = "runtime_config_file_path")]
    config_file: Option<PathBuf>,

    #[serde(default)]
    bootstrap_script: Option<PathBuf>,

    #[serde(default)]
    config_namespace: Option<String>,

    #[serde(default)]
    passthrough_extensions: Option<ExtensionList>,

    #[serde(default, rename = "path.nodejs", alias = "runtime_executable")]
    runtime_executable: Option<PathBuf>,

    #[serde(default)]
    autobundle: Option<bool>,
}

/// Either a TOML array or one whitespace/comma separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExtensionList {
    List(Vec<String>),
    Joined(String),
}

impl ExtensionList {
    fn into_vec(self) -> Vec<String> {
        match self {
            ExtensionList::List(list) => list,
            ExtensionList::Joined(joined) => joined
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

impl SettingsBuilder {
    /// Creates a builder from a TOML settings file.
    ///
    /// Relative paths are resolved against the directory of `path`.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).fs_context("reading settings file", path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&text, base)
    }

    /// Creates a builder from TOML text, resolving relative paths against `base`.
    pub fn from_toml_str(text: &str, base: &Path) -> Result<Self> {
        let file: SettingsFile = toml::from_str(text)?;
        let section = file.requirejs;
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        let mut builder = SettingsBuilder::new();
        if let Some(dir) = section.cache_directory {
            builder = builder.cache_directory(resolve(dir));
        }
        if let Some(file) = section.config_file {
            builder = builder.config_file(resolve(file));
        }
        if let Some(script) = section.bootstrap_script {
            builder = builder.bootstrap_script(resolve(script));
        }
        if let Some(namespace) = section.config_namespace {
            builder = builder.config_namespace(namespace);
        }
        if let Some(extensions) = section.passthrough_extensions {
            builder = builder.passthrough_extensions(extensions.into_vec());
        }
        if let Some(runtime) = section.runtime_executable {
            // bare names stay PATH lookups
            let runtime = if runtime.components().count() > 1 {
                resolve(runtime)
            } else {
                runtime
            };
            builder = builder.runtime_executable(runtime);
        }
        if let Some(enabled) = section.autobundle {
            builder = builder.autobundle(enabled);
        }
        Ok(builder)
    }
}
