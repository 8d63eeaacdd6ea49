//! Optimizer script generation.
//!
//! Generates the script fed to the JavaScript runtime from templates using
//! Handlebars. Every interpolated value is serialized to JSON first.

use super::template::{OPTIMIZE_TEMPLATE, PRELUDE_TEMPLATE};
use crate::bundler::error::Result;
use handlebars::Handlebars;
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

/// Values merged over the loader configuration for a bundle run.
#[derive(Debug, Clone, Serialize)]
pub struct Overrides<'a> {
    /// Output target
    pub out: &'a str,
    /// Module identifiers to resolve and concatenate
    pub include: &'a [String],
    /// Directory the module identifiers are relative to
    #[serde(rename = "baseUrl")]
    pub base_url: &'a Path,
    /// Optimization level
    pub optimize: &'a str,
}

impl<'a> Overrides<'a> {
    /// Concatenate to stdout, never minify.
    pub fn concatenate(include: &'a [String], base_url: &'a Path) -> Self {
        Self {
            out: "stdout",
            include,
            base_url,
            optimize: "none",
        }
    }
}

fn registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    handlebars.register_partial("prelude", PRELUDE_TEMPLATE)?;
    handlebars.register_template_string("prelude", PRELUDE_TEMPLATE)?;
    handlebars.register_template_string("optimize", OPTIMIZE_TEMPLATE)?;
    Ok(handlebars)
}

fn render<O: Serialize + ?Sized>(name: &str, config_file: &Path, overrides: &O) -> Result<String> {
    let mut data = BTreeMap::new();
    data.insert("config_file", serde_json::to_string(config_file)?);
    data.insert("overrides", serde_json::to_string(overrides)?);
    Ok(registry()?.render(name, &data)?)
}

/// Script that loads `config_file` and merges `overrides` into `conf`.
pub fn generate_prelude<O: Serialize + ?Sized>(config_file: &Path, overrides: &O) -> Result<String> {
    render("prelude", config_file, overrides)
}

/// Script that runs the optimizer with `overrides` merged into `config_file`.
pub fn generate_optimize_script<O: Serialize + ?Sized>(
    config_file: &Path,
    overrides: &O,
) -> Result<String> {
    render("optimize", config_file, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_serialize_with_bundler_keys() {
        let include = vec!["app".to_string(), "lib/util".to_string()];
        let overrides = Overrides::concatenate(&include, Path::new("/tmp/b/src"));
        assert_eq!(
            serde_json::to_value(&overrides).unwrap(),
            serde_json::json!({
                "out": "stdout",
                "include": ["app", "lib/util"],
                "baseUrl": "/tmp/b/src",
                "optimize": "none",
            })
        );
    }

    #[test]
    fn values_are_json_literals() {
        let include = vec!["it's\"quoted".to_string()];
        let overrides = Overrides::concatenate(&include, Path::new("/tmp/src"));
        let script =
            generate_optimize_script(Path::new("/srv/conf \"a\".js"), &overrides).unwrap();

        assert!(script.contains(r#"readFileSync("/srv/conf \"a\".js", {"#));
        assert!(script.contains(
            r#"var overrides = {"out":"stdout","include":["it's\"quoted"],"baseUrl":"/tmp/src","optimize":"none"};"#
        ));
        assert!(script.contains(r#"require("requirejs").optimize(conf"#));
        assert!(script.contains("process.exit(1);"));
    }

    #[test]
    fn prelude_merges_key_by_key() {
        let overrides = serde_json::json!({"a": 2, "b": 3});
        let script = generate_prelude(Path::new("/tmp/conf.js"), &overrides).unwrap();
        assert!(script.contains(r#"var overrides = {"a":2,"b":3};"#));
        assert!(script.contains("conf[key] = overrides[key];"));
        assert!(!script.contains("optimize"));
    }

    #[test]
    #[ignore = "requires node"]
    fn merge_overrides_shared_keys_at_runtime() {
        let node = which::which("node").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("conf.js");
        std::fs::write(&conf, r#"{"a":1, "c": 4}"#).unwrap();

        let overrides = serde_json::json!({"a": 2, "b": 3});
        let script = generate_prelude(&conf, &overrides).unwrap()
            + "console.log(JSON.stringify(conf));\n";
        let script_file = dir.path().join("merge.js");
        std::fs::write(&script_file, script).unwrap();

        let output = std::process::Command::new(node)
            .arg(&script_file)
            .output()
            .unwrap();
        assert!(output.status.success());
        let merged: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(merged, serde_json::json!({"a": 2, "b": 3, "c": 4}));
    }
}
