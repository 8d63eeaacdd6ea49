//! Bundle orchestration and coordination.
//!
//! This module provides the main [`RequireJs`] orchestrator that turns
//! template paths into a single JavaScript bundle.
//!
//! # Overview
//!
//! The bundler:
//! 1. Renders the loader bootstrap
//! 2. Writes every requested module and passthrough file to a scratch tree
//! 3. Runs the RequireJS optimizer over that tree
//! 4. Appends the runtime configuration and postprocesses the result
//!
//! # Module Organization
//!
//! - [`assemble`] - source tree layout and source path enumeration
//! - [`checksum`] - SHA256 bundle checksums
//! - [`orchestrator`] - Main [`RequireJs`] struct and bundling operations

pub mod assemble;
pub mod checksum;
mod orchestrator;

pub use assemble::SourceAssembler;
pub use checksum::bundle_hash;
pub use orchestrator::RequireJs;
