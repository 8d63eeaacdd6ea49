//! File system utilities for bundling.
//!
//! Provides file writes with automatic directory creation and
//! contextual error reporting.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;

/// Writes `content` to `path`, creating any parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).fs_context("creating source directory", parent)?;
    }
    std::fs::write(path, content).fs_context("writing bundle source", path)?;
    log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("views/items/item.html");
        write_file(&file, "<li></li>").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "<li></li>");
    }
}
