//! RequireJS bundling core.
//!
//! Lets a templating engine serve the RequireJS bootstrap and configuration
//! as ordinary template paths, and builds a single JavaScript bundle by
//! running the RequireJS optimizer in an external JavaScript runtime.

pub mod builder;
pub mod error;
pub mod loader;
pub mod optimizer;
pub mod settings;
pub mod templates;
pub mod utils;

pub use builder::{RequireJs, SourceAssembler, bundle_hash};
pub use error::{Error, Result};
pub use loader::{BOOTSTRAP_PATH, RUNTIME_CONFIG_PATH, RequireJsLoader, SYNTHETIC_PATHS, is_synthetic};
pub use optimizer::{Optimizer, RuntimeOutput};
pub use settings::{Settings, SettingsBuilder};
pub use templates::{DirectoryTemplates, JS_MIMETYPE, Loaded, Loader, Postprocessor, Templates};
