//! RequireJS asset proxy.

use super::{AssetError, Result, WebassetsProxy};
use crate::bundler::{Error, JS_MIMETYPE, RequireJs, SYNTHETIC_PATHS, Templates, is_synthetic};

/// Name under which this proxy reports missing assets.
pub const PROXY_NAME: &str = "requirejs";

/// `<script>` element loading `url`.
pub fn script_tag(url: &str) -> String {
    format!(r#"<script src="{}"></script>"#, handlebars::html_escape(url))
}

/// Serves the RequireJS module through the asset framework.
///
/// Single assets are never cached: [`WebassetsProxy::hash`] always returns
/// `None`. Bundles are keyed by the hashes of their paths.
pub struct RequireJsAssets<'a, T: Templates> {
    requirejs: &'a RequireJs<T>,
}

impl<'a, T: Templates> RequireJsAssets<'a, T> {
    /// Creates a proxy for `requirejs`.
    pub fn new(requirejs: &'a RequireJs<T>) -> Self {
        Self { requirejs }
    }

    /// The synthetic bootstrap and runtime config paths.
    pub fn default_single_asset_paths(&self) -> impl Iterator<Item = String> + use<'a, T> {
        SYNTHETIC_PATHS.iter().map(|path| path.to_string())
    }

    /// The synthetic paths followed by every bundle source path.
    pub fn default_bundle_paths(&self) -> impl Iterator<Item = String> + use<'a, T> {
        let requirejs = self.requirejs;
        SYNTHETIC_PATHS
            .iter()
            .map(|path| path.to_string())
            .chain(requirejs.iter_source_paths())
    }

    fn not_found(path: &str) -> impl FnOnce(Error) -> AssetError + '_ {
        move |error| {
            if error.is_not_found() {
                AssetError::NotFound {
                    proxy: PROXY_NAME.to_string(),
                    path: path.to_string(),
                }
            } else {
                error.into()
            }
        }
    }

    fn render_content(&self, path: &str) -> crate::bundler::Result<String> {
        let templates = self.requirejs.templates();
        if templates.mimetype(path)? == JS_MIMETYPE {
            return templates.render(path);
        }
        templates.load(path)?.into_content()
    }
}

impl<T: Templates> WebassetsProxy for RequireJsAssets<'_, T> {
    fn iter_default_paths(&self) -> Box<dyn Iterator<Item = String> + '_> {
        if self.requirejs.settings().autobundle() {
            Box::new(self.default_bundle_paths())
        } else {
            Box::new(self.default_single_asset_paths())
        }
    }

    fn validate_path(&self, path: &str) -> bool {
        is_synthetic(path) || self.requirejs.iter_source_paths().any(|p| p == path)
    }

    fn hash(&self, _path: &str) -> Option<String> {
        None
    }

    fn render(&self, path: &str) -> Result<String> {
        self.render_content(path).map_err(Self::not_found(path))
    }

    fn mimetype(&self, path: &str) -> Result<String> {
        self.requirejs
            .templates()
            .mimetype(path)
            .map_err(Self::not_found(path))
    }

    fn render_url(&self, url: &str) -> String {
        script_tag(url)
    }

    fn create_bundle(&self, paths: &[String]) -> Result<String> {
        Ok(self.requirejs.create_bundle(paths)?)
    }

    fn bundle_hash(&self, paths: &[String]) -> Result<String> {
        self.requirejs
            .bundle_hash(paths)
            .map_err(|error| match error {
                Error::TemplateNotFound(path) => AssetError::NotFound {
                    proxy: PROXY_NAME.to_string(),
                    path,
                },
                other => other.into(),
            })
    }

    fn bundle_mimetype(&self, _paths: &[String]) -> String {
        JS_MIMETYPE.to_string()
    }
}

impl<T: Templates> RequireJs<T> {
    /// Returns the asset framework proxy for this module.
    pub fn assets(&self) -> RequireJsAssets<'_, T> {
        RequireJsAssets::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{BOOTSTRAP_PATH, DirectoryTemplates, RUNTIME_CONFIG_PATH, SettingsBuilder};

    fn module(dir: &std::path::Path, autobundle: bool) -> RequireJs<DirectoryTemplates> {
        let web = dir.join("web");
        std::fs::create_dir_all(web.join("views")).unwrap();
        std::fs::write(web.join("app.js"), "var x=1;").unwrap();
        std::fs::write(web.join("views/item.html"), "<li></li>").unwrap();
        std::fs::write(web.join("style.css"), "li{}").unwrap();
        std::fs::write(dir.join("conf.js"), "{x:1}\n").unwrap();

        let settings = SettingsBuilder::new()
            .config_file(dir.join("conf.js"))
            .cache_directory(dir)
            .passthrough_extensions(vec!["html".into()])
            .autobundle(autobundle)
            .build()
            .unwrap();
        let templates = DirectoryTemplates::new(&web)
            .add_postprocessor(JS_MIMETYPE, |text| Ok(text.to_uppercase()));
        RequireJs::new(settings, templates).unwrap()
    }

    #[test]
    fn default_paths_follow_autobundle() {
        let dir = tempfile::tempdir().unwrap();

        let single = module(dir.path(), false);
        let paths: Vec<_> = single.assets().iter_default_paths().collect();
        assert_eq!(paths, [BOOTSTRAP_PATH, RUNTIME_CONFIG_PATH]);

        let bundled = module(dir.path(), true);
        let paths: Vec<_> = bundled.assets().iter_default_paths().collect();
        assert_eq!(
            paths,
            [
                BOOTSTRAP_PATH,
                RUNTIME_CONFIG_PATH,
                "app.js",
                BOOTSTRAP_PATH,
                RUNTIME_CONFIG_PATH,
                "views/item.html",
            ]
        );
    }

    #[test]
    fn validates_synthetic_and_source_paths() {
        let dir = tempfile::tempdir().unwrap();
        let requirejs = module(dir.path(), false);
        let assets = requirejs.assets();
        assert!(assets.validate_path(BOOTSTRAP_PATH));
        assert!(assets.validate_path("app.js"));
        assert!(assets.validate_path("views/item.html"));
        assert!(!assets.validate_path("style.css"));
        assert!(!assets.validate_path("missing.js"));
    }

    #[test]
    fn single_assets_have_no_hash() {
        let dir = tempfile::tempdir().unwrap();
        let requirejs = module(dir.path(), false);
        assert_eq!(requirejs.assets().hash("app.js"), None);
        assert_eq!(requirejs.assets().hash(BOOTSTRAP_PATH), None);
    }

    #[test]
    fn renders_scripts_postprocessed_and_files_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let requirejs = module(dir.path(), false);
        let assets = requirejs.assets();
        assert_eq!(assets.render("app.js").unwrap(), "VAR X=1;");
        assert_eq!(assets.render("views/item.html").unwrap(), "<li></li>");
        assert_eq!(
            assets.render(RUNTIME_CONFIG_PATH).unwrap(),
            "REQUIRE.CONFIG({X:1});\n"
        );
    }

    #[test]
    fn missing_assets_use_proxy_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let requirejs = module(dir.path(), false);
        let assets = requirejs.assets();
        match assets.render("missing.js").unwrap_err() {
            AssetError::NotFound { proxy, path } => {
                assert_eq!(proxy, PROXY_NAME);
                assert_eq!(path, "missing.js");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            assets.mimetype("missing.js").unwrap_err(),
            AssetError::NotFound { .. }
        ));
        assert!(matches!(
            assets.bundle_hash(&["missing.js".into()]).unwrap_err(),
            AssetError::NotFound { .. }
        ));
    }

    #[test]
    fn script_tags_and_bundle_mimetype() {
        let dir = tempfile::tempdir().unwrap();
        let requirejs = module(dir.path(), false);
        let assets = requirejs.assets();
        assert_eq!(
            assets.render_url("/_assets/requirejs/bundle.js"),
            r#"<script src="/_assets/requirejs/bundle.js"></script>"#
        );
        assert_eq!(assets.bundle_mimetype(&[]), "application/javascript");
        assert_eq!(
            assets.bundle_mimetype(&["views/item.html".into()]),
            "application/javascript"
        );
        assert_eq!(assets.mimetype("app.js").unwrap(), JS_MIMETYPE);
    }
}
