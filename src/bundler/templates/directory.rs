//! Filesystem-backed templating collaborator.

use super::{Loaded, Loader, Postprocessor, Templates};
use crate::bundler::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
};

/// Serves every file below a root directory as a template, verbatim.
///
/// Loaders registered for a content category take precedence over physical
/// files, and their paths are listed after the files.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_requirejs::bundler::{DirectoryTemplates, JS_MIMETYPE, Templates};
///
/// # fn example() -> kodegen_bundler_requirejs::bundler::Result<()> {
/// let templates = DirectoryTemplates::new("web/static")
///     .add_postprocessor(JS_MIMETYPE, |text| Ok(text.replace("DEBUG = true", "DEBUG = false")));
///
/// for path in templates.iter_paths(Some(JS_MIMETYPE)) {
///     println!("{path}: {}", templates.hash(&path)?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DirectoryTemplates {
    root: PathBuf,
    loaders: Vec<(String, Box<dyn Loader>)>,
    postprocessors: HashMap<String, Vec<Postprocessor>>,
}

impl std::fmt::Debug for DirectoryTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryTemplates")
            .field("root", &self.root)
            .field(
                "loaders",
                &self.loaders.iter().map(|(c, _)| c).collect::<Vec<_>>(),
            )
            .field(
                "postprocessors",
                &self
                    .postprocessors
                    .iter()
                    .map(|(m, chain)| (m, chain.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl DirectoryTemplates {
    /// Creates a collaborator serving files below `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            loaders: Vec::new(),
            postprocessors: HashMap::new(),
        }
    }

    /// Appends a postprocessor to the chain of `mimetype`.
    pub fn add_postprocessor<F>(mut self, mimetype: &str, postprocessor: F) -> Self
    where
        F: Fn(String) -> Result<String> + Send + Sync + 'static,
    {
        self.postprocessors
            .entry(mimetype.to_string())
            .or_default()
            .push(Box::new(postprocessor));
        self
    }

    /// Root directory of the template tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn loader_for(&self, path: &str) -> Option<&dyn Loader> {
        let category = extension(path)?;
        self.loaders
            .iter()
            .filter(|(c, _)| c == category)
            .map(|(_, loader)| loader.as_ref())
            .find(|loader| loader.is_valid(path))
    }

    /// Location of `path` below the root, if it is a regular file there.
    fn file_for(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return None;
        }
        let file = self.root.join(relative);
        file.is_file().then_some(file)
    }

    fn contains(&self, path: &str) -> bool {
        self.loader_for(path).is_some() || self.file_for(path).is_some()
    }

    fn iter_files(&self) -> impl Iterator<Item = String> + '_ {
        walkdir::WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                let parts = relative
                    .components()
                    .map(|c| c.as_os_str().to_str())
                    .collect::<Option<Vec<_>>>()?;
                Some(parts.join("/"))
            })
    }
}

impl Templates for DirectoryTemplates {
    fn render_with(&self, path: &str, apply_postprocessors: bool) -> Result<String> {
        let mut content = self.load(path)?.into_content()?;
        if apply_postprocessors {
            let mimetype = self.mimetype(path)?;
            for postprocessor in self.postprocessors(&mimetype) {
                content = postprocessor(content)?;
            }
        }
        Ok(content)
    }

    fn load(&self, path: &str) -> Result<Loaded> {
        if let Some(loader) = self.loader_for(path) {
            return loader.load(path);
        }
        self.file_for(path)
            .map(Loaded::File)
            .ok_or_else(|| Error::TemplateNotFound(path.to_string()))
    }

    fn mimetype(&self, path: &str) -> Result<String> {
        if !self.contains(path) {
            return Err(Error::TemplateNotFound(path.to_string()));
        }
        Ok(mimetype_for_extension(extension(path).unwrap_or_default()).to_string())
    }

    fn hash(&self, path: &str) -> Result<String> {
        let content = self.load(path)?.into_content()?;
        Ok(hex::encode(Sha256::digest(content.as_bytes())))
    }

    fn iter_paths(&self, mimetype: Option<&str>) -> Box<dyn Iterator<Item = String> + '_> {
        let loader_paths = self.loaders.iter().flat_map(|(_, loader)| loader.iter_paths());
        let all = self.iter_files().chain(loader_paths);
        match mimetype {
            None => Box::new(all),
            Some(wanted) => {
                let wanted = wanted.to_string();
                Box::new(all.filter(move |path| {
                    mimetype_for_extension(extension(path).unwrap_or_default()) == wanted
                }))
            }
        }
    }

    fn postprocessors(&self, mimetype: &str) -> &[Postprocessor] {
        self.postprocessors
            .get(mimetype)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn register_loader(&mut self, category: &str, loader: Box<dyn Loader>) {
        log::debug!("Registering template loader for category `{}`", category);
        self.loaders.push((category.to_string(), loader));
    }
}

/// Extension of the last path segment, without the dot.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then_some(ext)
}

fn mimetype_for_extension(ext: &str) -> &'static str {
    match ext {
        "js" => super::JS_MIMETYPE,
        "css" => "text/css",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "txt" => "text/plain",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
