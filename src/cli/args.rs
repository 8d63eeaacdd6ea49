//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with validation before any bundling work starts.

use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RequireJS bundler for template directories
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_requirejs",
    version,
    about = "RequireJS bundler for template directories",
    long_about = "RequireJS bundler for template directories.

Serves the RequireJS bootstrap and configuration alongside a template
directory and builds single-file JavaScript bundles with the RequireJS optimizer.

Usage:
  kodegen_bundler_requirejs --templates web --loader-config web/requirejs.conf.js bundle -o bundle.js
  kodegen_bundler_requirejs --settings webassets.toml --templates web render '!require-config.js'
  kodegen_bundler_requirejs --templates web --loader-config conf.js --passthrough html paths --bundle

Exit code 0 = command succeeded; a failed optimizer run exits with 1."
)]
pub struct Args {
    /// Root directory of the templates
    #[arg(short = 't', long, value_name = "DIR", global = true)]
    pub templates: Option<PathBuf>,

    /// TOML settings file with a [requirejs] table
    #[arg(short = 's', long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// RequireJS configuration file
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub loader_config: Option<PathBuf>,

    /// RequireJS bootstrap script (defaults to the bundled require.js)
    #[arg(long, value_name = "FILE", global = true)]
    pub bootstrap: Option<PathBuf>,

    /// JavaScript runtime executable
    #[arg(long, value_name = "EXE", env = "REQUIREJS_RUNTIME", global = true)]
    pub runtime: Option<PathBuf>,

    /// Extra file extension copied into bundles unmodified (repeatable)
    #[arg(short = 'p', long = "passthrough", value_name = "EXT", global = true)]
    pub passthrough: Vec<String>,

    /// Directory for bundle scratch trees (must exist)
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Bundle every default asset
    #[arg(long, global = true)]
    pub autobundle: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a bundle (all sources when no paths are given)
    Bundle {
        /// Template paths to include
        paths: Vec<String>,

        /// Write the bundle here instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render a single asset
    Render {
        /// Template path
        path: String,
    },

    /// List default asset paths (bundle paths too with --autobundle)
    Paths {
        /// List bundle paths regardless of --autobundle
        #[arg(long)]
        bundle: bool,
    },

    /// Print the checksum of a bundle
    Hash {
        /// Template paths in the bundle
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the script tag for a URL
    Url {
        /// Asset URL
        url: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if matches!(self.command, Command::Url { .. }) {
            return Ok(());
        }

        if self.templates.is_none() {
            return Err(CliError::MissingArgument {
                argument: "--templates".to_string(),
            });
        }

        if self.settings.is_none() && self.loader_config.is_none() {
            return Err(CliError::MissingArgument {
                argument: "--loader-config (or --settings)".to_string(),
            });
        }

        if let Some(ext) = self
            .passthrough
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(CliError::InvalidArguments {
                reason: format!("passthrough extension `{ext}` must be non-empty, without a leading dot"),
            });
        }

        Ok(())
    }
}
