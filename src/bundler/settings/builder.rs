//! Builder for constructing Settings.

use super::Settings;
use crate::bundler::error::{Context, Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Runtime binary used when none is configured.
pub const DEFAULT_RUNTIME: &str = "nodejs";

/// Namespace used when none is configured.
pub const DEFAULT_CONFIG_NAMESPACE: &str = "require";

/// Bootstrap script shipped with this crate.
pub const BUNDLED_BOOTSTRAP_SOURCE: &str = include_str!("../../../assets/require.js");

/// File name of [`BUNDLED_BOOTSTRAP_SOURCE`] inside the cache directory.
pub const BUNDLED_BOOTSTRAP_FILE: &str = "require.js";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_requirejs::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_requirejs::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .config_file("web/requirejs.conf.js")
///     .cache_directory("/var/cache/webassets")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug, Clone)]
pub struct SettingsBuilder {
    cache_directory: Option<PathBuf>,
    temp_base: Option<PathBuf>,
    config_file: Option<PathBuf>,
    bootstrap_script: Option<PathBuf>,
    config_namespace: Option<String>,
    passthrough_extensions: Vec<String>,
    runtime_executable: Option<PathBuf>,
    autobundle: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the cache directory. It must already exist.
    ///
    /// Default: `<temp base>/kodegen/requirejs`, created on build
    pub fn cache_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the base directory of the default cache directory.
    ///
    /// Default: [`std::env::temp_dir`]
    pub fn temp_base<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.temp_base = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the loader configuration file.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the loader bootstrap script.
    ///
    /// Default: [`BUNDLED_BOOTSTRAP_SOURCE`], written to
    /// `<cache_directory>/`[`BUNDLED_BOOTSTRAP_FILE`] on build
    pub fn bootstrap_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bootstrap_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the runtime configuration namespace.
    ///
    /// Default: [`DEFAULT_CONFIG_NAMESPACE`]
    pub fn config_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config_namespace = Some(namespace.into());
        self
    }

    /// Sets the passthrough extensions, without leading dots.
    ///
    /// Default: Empty
    pub fn passthrough_extensions(mut self, extensions: Vec<String>) -> Self {
        self.passthrough_extensions = extensions;
        self
    }

    /// Sets the JavaScript runtime executable.
    ///
    /// Default: [`DEFAULT_RUNTIME`], looked up in `PATH`
    pub fn runtime_executable<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.runtime_executable = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the asset framework autobundle flag.
    ///
    /// Default: false
    pub fn autobundle(mut self, enabled: bool) -> Self {
        self.autobundle = enabled;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `config_file` is missing
    /// - a configured `cache_directory` does not exist
    /// - the default cache directory cannot be created
    /// - the bundled bootstrap script cannot be written
    pub fn build(self) -> Result<Settings> {
        let cache_directory = match self.cache_directory {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(Error::Configuration(format!(
                        "configured cache directory `{}` does not exist",
                        dir.display()
                    )));
                }
                dir
            }
            None => {
                let dir = self
                    .temp_base
                    .unwrap_or_else(std::env::temp_dir)
                    .join("kodegen")
                    .join("requirejs");
                std::fs::create_dir_all(&dir).fs_context("creating cache directory", &dir)?;
                dir
            }
        };

        let config_file = absolute(&self.config_file.context("config_file is required")?)?;

        if let Some(ext) = self
            .passthrough_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(Error::Configuration(format!(
                "invalid passthrough extension `{ext}`: expected a suffix without leading dot"
            )));
        }

        let bootstrap_script = match self.bootstrap_script {
            Some(script) => absolute(&script)?,
            None => install_bundled_bootstrap(&cache_directory)?,
        };

        log::debug!(
            "Resolved settings: cache={}, config={}",
            cache_directory.display(),
            config_file.display()
        );

        Ok(Settings::new(
            cache_directory,
            config_file,
            bootstrap_script,
            self.config_namespace
                .unwrap_or_else(|| DEFAULT_CONFIG_NAMESPACE.to_string()),
            self.passthrough_extensions,
            self.runtime_executable
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNTIME)),
            self.autobundle,
        ))
    }
}

/// Writes the shipped bootstrap into `cache_directory` unless it is already there.
///
/// The file is replaced by rename, so readers never see a partial script.
fn install_bundled_bootstrap(cache_directory: &Path) -> Result<PathBuf> {
    let script = absolute(&cache_directory.join(BUNDLED_BOOTSTRAP_FILE))?;
    let current = std::fs::read_to_string(&script).ok();
    if current.as_deref() == Some(BUNDLED_BOOTSTRAP_SOURCE) {
        return Ok(script);
    }

    let mut staged = tempfile::NamedTempFile::new_in(cache_directory)
        .fs_context("staging bootstrap script in", cache_directory)?;
    staged
        .write_all(BUNDLED_BOOTSTRAP_SOURCE.as_bytes())
        .fs_context("writing bootstrap script", staged.path())?;
    staged
        .persist(&script)
        .map_err(|e| e.error)
        .fs_context("installing bootstrap script", &script)?;
    log::debug!("Installed bundled bootstrap at {}", script.display());
    Ok(script)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cache_directory_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .cache_directory(dir.path().join("nope"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn default_cache_directory_is_created_below_temp_base() {
        let base = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .temp_base(base.path())
            .build()
            .unwrap();
        let expected = base.path().join("kodegen").join("requirejs");
        assert_eq!(settings.cache_directory(), expected);
        assert!(expected.is_dir());
    }

    #[test]
    fn defaults_and_absolute_paths() {
        let base = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .temp_base(base.path())
            .build()
            .unwrap();
        assert!(settings.config_file().is_absolute());
        assert_eq!(
            settings.bootstrap_script(),
            base.path().join("kodegen/requirejs").join(BUNDLED_BOOTSTRAP_FILE)
        );
        assert_eq!(settings.runtime_executable(), Path::new(DEFAULT_RUNTIME));
        assert_eq!(settings.config_namespace(), "require");
        assert!(settings.passthrough_extensions().is_empty());
        assert!(!settings.autobundle());
    }

    #[test]
    fn config_file_is_required() {
        let base = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new()
            .temp_base(base.path())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "config_file is required");
    }

    #[test]
    fn dotted_extensions_are_rejected() {
        let base = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .temp_base(base.path())
            .passthrough_extensions(vec![".html".into()])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn bundled_bootstrap_lives_in_the_cache_directory() {
        let cache = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .cache_directory(cache.path())
            .build()
            .unwrap();

        let script = settings.bootstrap_script();
        assert!(script.is_absolute());
        assert!(script.starts_with(cache.path()));
        assert!(!script.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert_eq!(
            std::fs::read_to_string(script).unwrap(),
            BUNDLED_BOOTSTRAP_SOURCE
        );
        assert!(BUNDLED_BOOTSTRAP_SOURCE.contains("define.amd"));

        // a stale copy is replaced on the next build
        std::fs::write(script, "stale();").unwrap();
        let rebuilt = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .cache_directory(cache.path())
            .build()
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(rebuilt.bootstrap_script()).unwrap(),
            BUNDLED_BOOTSTRAP_SOURCE
        );
    }

    #[test]
    fn configured_bootstrap_is_not_replaced() {
        let cache = tempfile::tempdir().unwrap();
        let custom = cache.path().join("boot.js");
        std::fs::write(&custom, "BOOT;").unwrap();
        let settings = SettingsBuilder::new()
            .config_file("requirejs.conf.js")
            .cache_directory(cache.path())
            .bootstrap_script(&custom)
            .build()
            .unwrap();
        assert_eq!(settings.bootstrap_script(), custom);
        assert!(!cache.path().join(BUNDLED_BOOTSTRAP_FILE).exists());
    }
}
