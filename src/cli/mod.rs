//! Command line interface for the RequireJS bundler.
//!
//! This module wires parsed arguments to the bundling library:
//! settings resolution, the directory templating engine and the asset proxy.

mod args;

pub use args::{Args, Command};

use crate::{
    assets::{WebassetsProxy, script_tag},
    bundler::{DirectoryTemplates, RequireJs, Settings, SettingsBuilder},
    error::{CliError, Result},
};
use anyhow::Context as _;
use std::io::Write;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args, &mut std::io::stdout().lock())
}

/// Executes parsed arguments, writing command output to `out`.
pub fn execute(args: &Args, out: &mut dyn Write) -> Result<i32> {
    args.validate()?;

    match &args.command {
        Command::Bundle { paths, output } => {
            let requirejs = load_module(args)?;
            let bundle = requirejs.assets().create_bundle(paths)?;
            match output {
                Some(file) => {
                    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(file, &bundle)
                        .with_context(|| format!("failed to write bundle to {}", file.display()))?;
                    log::info!("Wrote bundle to {}", file.display());
                }
                None => out.write_all(bundle.as_bytes())?,
            }
        }
        Command::Render { path } => {
            let requirejs = load_module(args)?;
            out.write_all(requirejs.assets().render(path)?.as_bytes())?;
        }
        Command::Paths { bundle } => {
            let requirejs = load_module(args)?;
            let assets = requirejs.assets();
            let paths: Box<dyn Iterator<Item = String> + '_> = if *bundle {
                Box::new(assets.default_bundle_paths())
            } else {
                assets.iter_default_paths()
            };
            for path in paths {
                writeln!(out, "{path}")?;
            }
        }
        Command::Hash { paths } => {
            let requirejs = load_module(args)?;
            writeln!(out, "{}", requirejs.assets().bundle_hash(paths)?)?;
        }
        Command::Url { url } => {
            writeln!(out, "{}", script_tag(url))?;
        }
    }

    Ok(0)
}

/// Builds the RequireJS module over the `--templates` directory.
fn load_module(args: &Args) -> Result<RequireJs<DirectoryTemplates>> {
    let root = args
        .templates
        .as_ref()
        .ok_or_else(|| CliError::MissingArgument {
            argument: "--templates".to_string(),
        })?;
    let settings = resolve_settings(args)?;
    Ok(RequireJs::new(settings, DirectoryTemplates::new(root))?)
}

/// Merges the settings file (if any) with command line overrides.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut builder = match &args.settings {
        Some(file) => SettingsBuilder::from_toml_file(file)?,
        None => SettingsBuilder::new(),
    };
    if let Some(file) = &args.loader_config {
        builder = builder.config_file(file);
    }
    if let Some(script) = &args.bootstrap {
        builder = builder.bootstrap_script(script);
    }
    if let Some(runtime) = &args.runtime {
        builder = builder.runtime_executable(runtime);
    }
    if !args.passthrough.is_empty() {
        builder = builder.passthrough_extensions(args.passthrough.clone());
    }
    if let Some(dir) = &args.cache_dir {
        builder = builder.cache_directory(dir);
    }
    if args.autobundle {
        builder = builder.autobundle(true);
    }
    Ok(builder.build()?)
}
