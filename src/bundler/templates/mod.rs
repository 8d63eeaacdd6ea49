//! Templating collaborator contract.
//!
//! The bundler never renders templates itself. It talks to a templating
//! engine through the [`Templates`] trait and plugs its own synthetic files
//! into that engine through the [`Loader`] trait.
//!
//! [`DirectoryTemplates`] is a small filesystem-backed implementation used by
//! the command line tool and the test suite.

mod directory;

pub use directory::DirectoryTemplates;

use crate::bundler::error::{ErrorExt, Result};
use std::path::PathBuf;

/// Mimetype of JavaScript templates and of every bundle produced here.
pub const JS_MIMETYPE: &str = "application/javascript";

/// Outcome of resolving a logical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// The path is backed by a physical file at this location.
    File(PathBuf),
    /// The path has no backing file; this is its content.
    Inline(String),
}

impl Loaded {
    /// Returns the content, reading the backing file if there is one.
    pub fn into_content(self) -> Result<String> {
        match self {
            Loaded::File(path) => {
                std::fs::read_to_string(&path).fs_context("reading template file", &path)
            }
            Loaded::Inline(content) => Ok(content),
        }
    }
}

/// A function applied to fully rendered text of a given mimetype.
pub type Postprocessor = Box<dyn Fn(String) -> Result<String> + Send + Sync>;

/// Pluggable source of logical paths for a templating engine.
pub trait Loader: Send + Sync {
    /// Every path this loader can serve.
    fn iter_paths(&self) -> Box<dyn Iterator<Item = String> + '_>;

    /// Resolves `path`, failing with [`Error::TemplateNotFound`](crate::bundler::Error::TemplateNotFound)
    /// for paths this loader does not own.
    fn load(&self, path: &str) -> Result<Loaded>;

    /// Whether this loader owns `path`.
    fn is_valid(&self, path: &str) -> bool;
}

/// The operations the bundler needs from a templating engine.
pub trait Templates {
    /// Renders `path` with the postprocessor chain of its mimetype applied.
    fn render(&self, path: &str) -> Result<String> {
        self.render_with(path, true)
    }

    /// Renders `path`, optionally skipping postprocessing.
    fn render_with(&self, path: &str, apply_postprocessors: bool) -> Result<String>;

    /// Resolves `path` to a file location or inline content.
    fn load(&self, path: &str) -> Result<Loaded>;

    /// Mimetype of `path`.
    fn mimetype(&self, path: &str) -> Result<String>;

    /// Content hash of `path`.
    fn hash(&self, path: &str) -> Result<String>;

    /// Known paths, optionally restricted to one mimetype.
    fn iter_paths(&self, mimetype: Option<&str>) -> Box<dyn Iterator<Item = String> + '_>;

    /// Postprocessors registered for `mimetype`, in application order.
    fn postprocessors(&self, mimetype: &str) -> &[Postprocessor];

    /// Registers an additional loader for a content category (e.g. `"js"`).
    fn register_loader(&mut self, category: &str, loader: Box<dyn Loader>);
}
