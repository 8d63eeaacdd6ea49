//! Shared helpers for integration tests.
//!
//! Bundling needs a JavaScript runtime with the RequireJS optimizer. The
//! helpers here install small shell scripts that stand in for it: they read
//! the generated optimizer script from stdin and concatenate the included
//! modules from the `baseUrl` directory.

#![allow(dead_code)]

use std::{
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    sync::OnceLock,
};

/// Concatenates the included modules and records the source tree layout in
/// `sources.txt` next to the loader configuration file.
const CONCAT_RUNTIME: &str = r#"#!/bin/sh
script=$(cat)
base=$(printf '%s\n' "$script" | sed -n 's/.*"baseUrl":"\([^"]*\)".*/\1/p')
conf=$(printf '%s\n' "$script" | sed -n 's/.*readFileSync("\([^"]*\)".*/\1/p')
include=$(printf '%s\n' "$script" | sed -n 's/.*"include":\[\([^]]*\)\].*/\1/p' | tr -d '"' | tr ',' ' ')
(cd "$base" && find . -type f | sort) > "$(dirname "$conf")/sources.txt"
echo "Tracing dependencies for: stdout" >&2
for module in $include; do
    cat "$base/$module.js"
done
"#;

/// Fails the way the optimizer does when a module cannot be read.
const FAILING_RUNTIME: &str = r#"#!/bin/sh
cat > /dev/null
echo "Error: ENOENT: no such file or directory, open 'missing.js'" >&2
exit 1
"#;

struct Runtimes {
    _dir: tempfile::TempDir,
    concat: PathBuf,
    failing: PathBuf,
}

/// Scripts are written once, before any test spawns a process, so no child
/// inherits a descriptor of a script that is still open for writing.
fn runtimes() -> &'static Runtimes {
    static RUNTIMES: OnceLock<Runtimes> = OnceLock::new();
    RUNTIMES.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let concat = install(dir.path(), "concat-runtime", CONCAT_RUNTIME);
        let failing = install(dir.path(), "failing-runtime", FAILING_RUNTIME);
        Runtimes {
            _dir: dir,
            concat,
            failing,
        }
    })
}

fn install(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Runtime that concatenates the included modules.
pub fn concat_runtime() -> &'static Path {
    &runtimes().concat
}

/// Runtime that exits with status 1.
pub fn failing_runtime() -> &'static Path {
    &runtimes().failing
}

/// Directory holding the template and configuration fixtures.
pub fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Writes `files` (relative path, content) below `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let file = root.join(path);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, content).unwrap();
    }
}

/// Entries left in `dir`.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
