//! Bundle checksum calculation.
//!
//! A bundle is identified by the hashes of its constituent paths, so the
//! checksum can be computed without building the bundle.

use crate::bundler::{error::Result, templates::Templates};
use sha2::{Digest, Sha256};

/// Calculates the SHA-256 checksum of a bundle made of `paths`.
///
/// # Algorithm
///
/// 1. Sort the paths lexicographically, so input order does not matter
/// 2. Ask the templating collaborator for the hash of each path
/// 3. Join the hashes with a NUL byte and hash the result
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If any path cannot be hashed
pub fn bundle_hash<T: Templates + ?Sized>(templates: &T, paths: &[String]) -> Result<String> {
    let mut sorted: Vec<&str> = paths.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let hashes = sorted
        .into_iter()
        .map(|path| templates.hash(path))
        .collect::<Result<Vec<_>>>()?;

    let mut hasher = Sha256::new();
    hasher.update(hashes.join("\0").as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::DirectoryTemplates;

    #[test]
    fn order_independent_and_content_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "var a;").unwrap();
        std::fs::write(dir.path().join("b.js"), "var b;").unwrap();
        let templates = DirectoryTemplates::new(dir.path());

        let forward = bundle_hash(&templates, &["a.js".into(), "b.js".into()]).unwrap();
        let backward = bundle_hash(&templates, &["b.js".into(), "a.js".into()]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 64);

        std::fs::write(dir.path().join("b.js"), "var b = 2;").unwrap();
        let changed = bundle_hash(&templates, &["a.js".into(), "b.js".into()]).unwrap();
        assert_ne!(forward, changed);
    }

    #[test]
    fn matches_hash_of_joined_path_hashes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "var a;").unwrap();
        std::fs::write(dir.path().join("b.js"), "var b;").unwrap();
        let templates = DirectoryTemplates::new(dir.path());

        let joined = format!(
            "{}\0{}",
            templates.hash("a.js").unwrap(),
            templates.hash("b.js").unwrap()
        );
        let expected = hex::encode(Sha256::digest(joined.as_bytes()));
        assert_eq!(
            bundle_hash(&templates, &["b.js".into(), "a.js".into()]).unwrap(),
            expected
        );
    }

    #[test]
    fn unknown_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let templates = DirectoryTemplates::new(dir.path());
        assert!(bundle_hash(&templates, &["nope.js".into()]).unwrap_err().is_not_found());
    }
}
