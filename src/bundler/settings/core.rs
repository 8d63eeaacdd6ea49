//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

/// Resolved configuration of the RequireJS bundler.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which validates
/// directories and absolutizes paths once. Immutable afterwards.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_requirejs::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_requirejs::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .config_file("web/requirejs.conf.js")
///     .passthrough_extensions(vec!["html".into(), "txt".into()])
///     .runtime_executable("node")
///     .build()?;
///
/// assert_eq!(settings.config_namespace(), "require");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Parent directory of every per-bundle source tree.
    cache_directory: PathBuf,

    /// Loader configuration source, absolute.
    config_file: PathBuf,

    /// Loader bootstrap script, absolute.
    bootstrap_script: PathBuf,

    /// Namespace of the `<namespace>.config(...)` call.
    config_namespace: String,

    /// Extra file suffixes copied into the bundle source tree unmodified.
    passthrough_extensions: Vec<String>,

    /// JavaScript runtime binary, name or path.
    runtime_executable: PathBuf,

    /// Whether the asset framework bundles every default asset.
    autobundle: bool,
}

impl Settings {
    /// Returns the cache directory.
    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }

    /// Returns the loader configuration file.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Returns the loader bootstrap script.
    pub fn bootstrap_script(&self) -> &Path {
        &self.bootstrap_script
    }

    /// Returns the runtime configuration namespace.
    pub fn config_namespace(&self) -> &str {
        &self.config_namespace
    }

    /// Returns the passthrough extensions, in configured order.
    pub fn passthrough_extensions(&self) -> &[String] {
        &self.passthrough_extensions
    }

    /// Returns the JavaScript runtime executable.
    pub fn runtime_executable(&self) -> &Path {
        &self.runtime_executable
    }

    /// Returns the asset framework autobundle flag.
    pub fn autobundle(&self) -> bool {
        self.autobundle
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        cache_directory: PathBuf,
        config_file: PathBuf,
        bootstrap_script: PathBuf,
        config_namespace: String,
        passthrough_extensions: Vec<String>,
        runtime_executable: PathBuf,
        autobundle: bool,
    ) -> Self {
        Self {
            cache_directory,
            config_file,
            bootstrap_script,
            config_namespace,
            passthrough_extensions,
            runtime_executable,
            autobundle,
        }
    }
}
