//! Main bundler orchestration and coordination.
//!
//! This module provides the [`RequireJs`] configured module that turns a set
//! of template paths into one JavaScript bundle.

use super::{
    assemble::{SourceAssembler, passthrough_pattern},
    checksum::bundle_hash,
};
use crate::bundler::{
    error::{ErrorExt, Result},
    loader::{BOOTSTRAP_PATH, RUNTIME_CONFIG_PATH, RequireJsLoader},
    optimizer::Optimizer,
    settings::Settings,
    templates::{JS_MIMETYPE, Templates},
    utils::fs::write_file,
};
use regex::Regex;

/// RequireJS integration for a templating engine.
///
/// Construction registers the synthetic bootstrap and runtime config paths
/// with the templating engine. Bundles are rebuilt from scratch on every
/// call; concurrent calls each get their own source tree.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_requirejs::bundler::{DirectoryTemplates, RequireJs, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_requirejs::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .config_file("web/requirejs.conf.js")
///     .passthrough_extensions(vec!["html".into()])
///     .build()?;
///
/// let requirejs = RequireJs::new(settings, DirectoryTemplates::new("web/static"))?;
///
/// // Bundle every JavaScript and passthrough file
/// let bundle = requirejs.create_bundle(&[])?;
/// println!("{} bytes", bundle.len());
/// # Ok(())
/// # }
/// ```
pub struct RequireJs<T: Templates> {
    settings: Settings,
    templates: T,
    optimizer: Optimizer,
    passthrough: Option<Regex>,
}

impl<T: Templates + std::fmt::Debug> std::fmt::Debug for RequireJs<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequireJs")
            .field("settings", &self.settings)
            .field("templates", &self.templates)
            .field("optimizer", &self.optimizer)
            .finish()
    }
}

impl<T: Templates> RequireJs<T> {
    /// Creates the module and registers its loader under the `js` category.
    ///
    /// # Errors
    ///
    /// Returns an error if the passthrough extensions do not form a valid pattern.
    pub fn new(settings: Settings, mut templates: T) -> Result<Self> {
        let passthrough = passthrough_pattern(settings.passthrough_extensions())?;
        templates.register_loader("js", Box::new(RequireJsLoader::new(&settings)));
        let optimizer = Optimizer::new(settings.runtime_executable());

        Ok(Self {
            settings,
            templates,
            optimizer,
            passthrough,
        })
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a reference to the templating engine.
    pub fn templates(&self) -> &T {
        &self.templates
    }

    /// Returns the assembler used to lay out bundle sources.
    pub fn assembler(&self) -> SourceAssembler<'_, T> {
        SourceAssembler::new(&self.templates, self.passthrough.as_ref())
    }

    /// Every JavaScript and passthrough path, in templating engine order.
    pub fn iter_source_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.assembler().iter_source_paths()
    }

    /// Builds the bundle for `paths`, or for every source path if empty.
    ///
    /// # Process
    ///
    /// 1. Render the bootstrap script
    /// 2. Lay out sources in a fresh directory below the cache directory
    /// 3. Run the optimizer over the assembled modules
    /// 4. Concatenate bootstrap, optimizer output and runtime config
    /// 5. Apply the JavaScript postprocessors
    ///
    /// The source directory is removed on every exit path. Any failure
    /// aborts the bundle; nothing partial is returned.
    pub fn create_bundle(&self, paths: &[String]) -> Result<String> {
        log::info!("Building RequireJS bundle ({} requested paths)", paths.len());

        // postprocessors run once over the whole bundle below
        let bootstrap = self.templates.render_with(BOOTSTRAP_PATH, false)?;

        let tmpdir = tempfile::Builder::new()
            .prefix("requirejs-")
            .tempdir_in(self.settings.cache_directory())
            .fs_context(
                "creating bundle source directory in",
                self.settings.cache_directory(),
            )?;
        let srcdir = tmpdir.path().join("src");
        log::debug!("Assembling bundle sources in {}", srcdir.display());

        write_file(&srcdir.join("require.js"), &bootstrap)?;
        let include = self.assembler().assemble(&srcdir, paths)?;

        let body = self
            .optimizer
            .invoke(self.settings.config_file(), &include, &srcdir)?
            .into_stdout()?;

        let mut bundle = bootstrap;
        bundle.push_str(&body);
        bundle.push_str(&self.templates.render_with(RUNTIME_CONFIG_PATH, false)?);

        for postprocessor in self.templates.postprocessors(JS_MIMETYPE) {
            bundle = postprocessor(bundle)?;
        }

        tmpdir
            .close()
            .fs_context("removing bundle source directory", &srcdir)?;

        log::info!(
            "Built RequireJS bundle: {} modules, {} bytes",
            include.len(),
            bundle.len()
        );
        Ok(bundle)
    }

    /// Checksum of the bundle made of `paths`.
    pub fn bundle_hash(&self, paths: &[String]) -> Result<String> {
        bundle_hash(&self.templates, paths)
    }
}
