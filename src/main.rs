//! Kodegen Bundler RequireJS - RequireJS bundles for template directories.
//!
//! This binary renders the RequireJS virtual assets and builds optimized
//! bundles from a template directory.

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match kodegen_bundler_requirejs::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
