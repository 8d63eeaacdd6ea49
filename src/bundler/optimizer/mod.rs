//! RequireJS optimizer invocation.
//!
//! The optimizer runs inside an external JavaScript runtime. A throwaway
//! script is generated from a template, piped to the runtime, and the
//! concatenated modules are read back from its stdout.
//!
//! # Module Organization
//!
//! - `template` - script template constants
//! - `script` - script generation from templates
//! - `run` - runtime execution and output capture

mod run;
mod script;
mod template;

pub use run::{RuntimeOutput, resolve_executable, run_script};
pub use script::{Overrides, generate_optimize_script, generate_prelude};

use crate::bundler::error::Result;
use std::path::{Path, PathBuf};

/// Runs the RequireJS optimizer through a JavaScript runtime.
#[derive(Debug, Clone)]
pub struct Optimizer {
    runtime: PathBuf,
}

impl Optimizer {
    /// Creates an optimizer using the `runtime` executable.
    pub fn new<P: AsRef<Path>>(runtime: P) -> Self {
        Self {
            runtime: runtime.as_ref().to_path_buf(),
        }
    }

    /// Returns the runtime executable.
    pub fn runtime(&self) -> &Path {
        &self.runtime
    }

    /// Concatenates the `include` modules found below `base_url`.
    ///
    /// The loader configuration in `config_file` is used as the base build
    /// configuration. The output is returned as captured; a non-zero exit is
    /// turned into an error by [`RuntimeOutput::into_stdout`].
    pub fn invoke(
        &self,
        config_file: &Path,
        include: &[String],
        base_url: &Path,
    ) -> Result<RuntimeOutput> {
        let overrides = Overrides::concatenate(include, base_url);
        let script = generate_optimize_script(config_file, &overrides)?;
        log::debug!(
            "Optimizing {} modules from {}",
            include.len(),
            base_url.display()
        );
        run_script(&self.runtime, &script)
    }
}
