//! Asset serving integration.
//!
//! The asset framework talks to content providers through the
//! [`WebassetsProxy`] trait. [`RequireJsAssets`] exposes the RequireJS module
//! (single scripts, passthrough files and bundles) through it.

mod requirejs;

pub use requirejs::{PROXY_NAME, RequireJsAssets, script_tag};

use thiserror::Error;

/// Result type alias for asset proxy operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Errors reported to the asset framework.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The proxy does not know the requested path.
    #[error("asset not found in {proxy}: {path}")]
    NotFound {
        /// Proxy that was asked
        proxy: String,
        /// Requested path
        path: String,
    },

    /// Rendering or bundling failed.
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}

/// Capabilities an asset provider offers to the asset framework.
pub trait WebassetsProxy {
    /// Paths served when the caller does not name any.
    fn iter_default_paths(&self) -> Box<dyn Iterator<Item = String> + '_>;

    /// Whether `path` can be served.
    fn validate_path(&self, path: &str) -> bool;

    /// Stable content hash of a single asset, `None` if unknown.
    fn hash(&self, path: &str) -> Option<String>;

    /// Content of a single asset.
    fn render(&self, path: &str) -> Result<String>;

    /// Mimetype of a single asset.
    fn mimetype(&self, path: &str) -> Result<String>;

    /// HTML that references the asset at `url`.
    fn render_url(&self, url: &str) -> String;

    /// Content of the bundle made of `paths`.
    fn create_bundle(&self, paths: &[String]) -> Result<String>;

    /// Content hash of the bundle made of `paths`.
    fn bundle_hash(&self, paths: &[String]) -> Result<String>;

    /// Mimetype of the bundle made of `paths`.
    fn bundle_mimetype(&self, paths: &[String]) -> String;
}
