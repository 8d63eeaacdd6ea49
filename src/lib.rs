//! RequireJS bundling for template-driven asset pipelines
//!
//! This library serves the RequireJS bootstrap script and runtime
//! configuration as virtual assets, and builds single-file bundles by
//! driving the RequireJS optimizer on a JavaScript runtime.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod assets;
pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use assets::{AssetError, RequireJsAssets, WebassetsProxy};
pub use bundler::{DirectoryTemplates, RequireJs, Settings, SettingsBuilder, Templates};
pub use error::{BundlerError, CliError, Result};
