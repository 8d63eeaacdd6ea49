//! Bundle source tree assembly.
//!
//! Renders every requested path into a scratch directory laid out the way
//! the optimizer expects: JavaScript modules as `<module>.js` below the base
//! directory, passthrough files at their original relative path.

use crate::bundler::{
    error::Result,
    loader::is_synthetic,
    templates::{JS_MIMETYPE, Templates},
    utils::fs::write_file,
};
use regex::Regex;
use std::path::Path;

/// Compiles the suffix pattern matching any of `extensions`.
///
/// Returns `None` for an empty list, so that no passthrough files are
/// enumerated at all.
pub fn passthrough_pattern(extensions: &[String]) -> Result<Option<Regex>> {
    if extensions.is_empty() {
        return Ok(None);
    }
    let alternatives = extensions
        .iter()
        .map(|ext| regex::escape(ext))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&format!(r"\.({alternatives})$"))?))
}

/// Module identifier of a JavaScript path: the path without its extension.
pub fn module_name(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    let name = &path[name_start..];
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(dot) => &path[..name_start + leading_dots + dot],
        None => path,
    }
}

/// Comment block written above every JavaScript module in the source tree.
pub fn banner(path: &str) -> String {
    let sep = "-".repeat(path.chars().count());
    format!("//--{sep}--//\n//  {path}  //\n//--{sep}--//\n")
}

/// Collects template output into a bundle source tree.
pub struct SourceAssembler<'a, T: Templates + ?Sized> {
    templates: &'a T,
    passthrough: Option<&'a Regex>,
}

impl<'a, T: Templates + ?Sized> SourceAssembler<'a, T> {
    /// Creates an assembler over `templates` with an optional passthrough pattern.
    pub fn new(templates: &'a T, passthrough: Option<&'a Regex>) -> Self {
        Self {
            templates,
            passthrough,
        }
    }

    /// Every path that may go into a bundle.
    ///
    /// JavaScript paths first, then passthrough matches, both in the order the
    /// templating collaborator lists them. Overlaps are not removed.
    pub fn iter_source_paths(&self) -> impl Iterator<Item = String> + use<'a, T> {
        let templates = self.templates;
        let scripts = templates.iter_paths(Some(JS_MIMETYPE));
        let passthrough = self.passthrough.into_iter().flat_map(move |pattern| {
            templates
                .iter_paths(None)
                .filter(move |path| pattern.is_match(path))
        });
        scripts.chain(passthrough)
    }

    /// Writes `paths` (or every source path, if empty) below `folder`.
    ///
    /// Synthetic paths are skipped. Returns the module identifiers of the
    /// JavaScript paths in the order they were encountered.
    pub fn assemble(&self, folder: &Path, paths: &[String]) -> Result<Vec<String>> {
        let paths = if paths.is_empty() {
            self.iter_source_paths().collect()
        } else {
            paths.to_vec()
        };

        let mut include = Vec::new();
        for path in &paths {
            if is_synthetic(path) {
                continue;
            }
            let (file, content) = if self.templates.mimetype(path)? == JS_MIMETYPE {
                let content = self.templates.render_with(path, false)?;
                let module = module_name(path);
                include.push(module.to_string());
                (
                    folder.join(format!("{module}.js")),
                    format!("{}{}", banner(path), content),
                )
            } else {
                let content = self.templates.load(path)?.into_content()?;
                (folder.join(path), content)
            };
            write_file(&file, &format!("{content}\n\n\n"))?;
        }

        log::debug!(
            "Assembled {} source files, {} modules, in {}",
            paths.len(),
            include.len(),
            folder.display()
        );
        Ok(include)
    }
}
