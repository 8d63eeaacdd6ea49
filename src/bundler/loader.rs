//! Synthetic template paths for the RequireJS bootstrap and configuration.
//!
//! Neither path exists in the template tree. The bootstrap resolves to the
//! loader script file, the runtime config is generated from the configured
//! loader configuration each time it is loaded.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    templates::{Loaded, Loader},
};
use std::path::PathBuf;

/// Logical path of the loader bootstrap script.
pub const BOOTSTRAP_PATH: &str = "!require.js";

/// Logical path of the rendered runtime configuration.
pub const RUNTIME_CONFIG_PATH: &str = "!require-config.js";

/// Both synthetic paths, bootstrap first.
pub const SYNTHETIC_PATHS: [&str; 2] = [BOOTSTRAP_PATH, RUNTIME_CONFIG_PATH];

/// Whether `path` is one of the synthetic paths.
pub fn is_synthetic(path: &str) -> bool {
    SYNTHETIC_PATHS.contains(&path)
}

/// Template loader serving [`BOOTSTRAP_PATH`] and [`RUNTIME_CONFIG_PATH`].
#[derive(Debug, Clone)]
pub struct RequireJsLoader {
    bootstrap_script: PathBuf,
    config_file: PathBuf,
    config_namespace: String,
}

impl RequireJsLoader {
    /// Creates a loader for the configured bootstrap script and config file.
    pub fn new(settings: &Settings) -> Self {
        Self {
            bootstrap_script: settings.bootstrap_script().to_path_buf(),
            config_file: settings.config_file().to_path_buf(),
            config_namespace: settings.config_namespace().to_string(),
        }
    }

    /// Reads the configuration file and wraps it in a `<namespace>.config(...)` call.
    fn runtime_config(&self) -> Result<String> {
        let conf = std::fs::read_to_string(&self.config_file)
            .fs_context("reading loader configuration", &self.config_file)?;
        Ok(format!(
            "{}.config({});\n",
            self.config_namespace,
            conf.trim_end()
        ))
    }
}

impl Loader for RequireJsLoader {
    fn iter_paths(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(SYNTHETIC_PATHS.iter().map(|path| path.to_string()))
    }

    fn load(&self, path: &str) -> Result<Loaded> {
        match path {
            BOOTSTRAP_PATH => Ok(Loaded::File(self.bootstrap_script.clone())),
            RUNTIME_CONFIG_PATH => self.runtime_config().map(Loaded::Inline),
            _ => Err(Error::TemplateNotFound(path.to_string())),
        }
    }

    fn is_valid(&self, path: &str) -> bool {
        is_synthetic(path)
    }
}
