//! JavaScript runtime execution.
//!
//! Feeds a script to the runtime on stdin and captures both output streams.
//! The call blocks until the process exits; there is no timeout.

use crate::bundler::error::{Error, Result};
use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Captured result of a runtime invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOutput {
    /// Program that was run
    pub program: String,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
}

impl RuntimeOutput {
    /// Whether the runtime exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Returns stdout of a successful run, or [`Error::ProcessFailed`].
    ///
    /// Stderr of a successful run is diagnostic noise and only logged.
    pub fn into_stdout(self) -> Result<String> {
        if !self.success() {
            log::error!("{}", self.stderr);
            return Err(Error::ProcessFailed {
                program: self.program,
                exit_code: self.exit_code,
                stdout: self.stdout,
                stderr: self.stderr,
            });
        }
        if !self.stderr.is_empty() {
            log::info!("{} output:\n{}", self.program, self.stderr);
        }
        Ok(self.stdout)
    }
}

/// Locates `executable`, either a bare name looked up in `PATH` or a path.
pub fn resolve_executable(executable: &Path) -> Result<PathBuf> {
    which::which(executable).map_err(|source| Error::RuntimeNotFound {
        executable: executable.display().to_string(),
        source,
    })
}

/// Runs `executable` without arguments, writing `script` to its stdin.
pub fn run_script(executable: &Path, script: &str) -> Result<RuntimeOutput> {
    let program = resolve_executable(executable)?;
    let name = executable.display().to_string();
    log::debug!("Running {} ({})", name, program.display());

    let mut child = Command::new(&program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| Error::CommandFailed {
            command: name.clone(),
            error,
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::GenericError(format!("{name}: stdin was not captured")))?;

    // stdin is written on its own thread so a chatty runtime cannot fill
    // the output pipes while we are still writing
    let (written, output) = std::thread::scope(|scope| {
        let writer = scope.spawn(move || stdin.write_all(script.as_bytes()));
        let output = child.wait_with_output();
        (writer.join(), output)
    });

    let output = output.map_err(|error| Error::CommandFailed {
        command: name.clone(),
        error,
    })?;
    match written {
        Ok(Ok(())) => {}
        // the runtime quit without reading everything; its exit status says why
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            log::debug!("{name} closed stdin early");
        }
        Ok(Err(error)) => {
            return Err(Error::CommandFailed {
                command: name,
                error,
            });
        }
        Err(_) => crate::bail!("{name}: stdin writer panicked"),
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|e| Error::GenericError(format!("{name} wrote invalid UTF-8 to stdout: {e}")))?;
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    Ok(RuntimeOutput {
        program: name,
        stdout,
        stderr,
        exit_code: output.status.code(),
    })
}
