//! Configuration structures for bundling operations.
//!
//! Settings are collected with [`SettingsBuilder`], either programmatically
//! or from a TOML settings file, and resolved once into an immutable
//! [`Settings`].

mod builder;
mod core;
mod file;

pub use builder::{
    BUNDLED_BOOTSTRAP_FILE, BUNDLED_BOOTSTRAP_SOURCE, DEFAULT_CONFIG_NAMESPACE, DEFAULT_RUNTIME, SettingsBuilder,
};
pub use core::Settings;
