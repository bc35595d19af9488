//! Hands an interactive session over to the MongoDB Shell.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::info;

const MONGOSH_BIN: &str = "mongosh";

#[derive(Debug, Error)]
pub enum MongoshError {
    #[error("'{0}' not found in PATH, install the MongoDB Shell to use this command")]
    NotFound(String),

    #[error("Failed to launch {path}: {source}")]
    Exec {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Platform specific binary name.
pub fn bin() -> String {
    if cfg!(windows) {
        format!("{}.exe", MONGOSH_BIN)
    } else {
        MONGOSH_BIN.to_string()
    }
}

/// Location of the shell binary on `PATH`, if installed.
pub fn path() -> Option<PathBuf> {
    which::which(bin()).ok()
}

pub fn locate() -> Result<PathBuf, MongoshError> {
    path().ok_or_else(|| MongoshError::NotFound(bin()))
}

fn command(binary: &Path, username: &str, password: &str, mongo_uri: &str) -> Command {
    let mut cmd = Command::new(binary);
    cmd.args(["-u", username, "-p", password, mongo_uri]);
    cmd
}

/// Replaces the current process with `mongosh`.
///
/// Only returns when the launch fails.
#[cfg(unix)]
pub fn run(
    binary: &Path,
    username: &str,
    password: &str,
    mongo_uri: &str,
) -> Result<Infallible, MongoshError> {
    use std::os::unix::process::CommandExt;

    info!(binary = %binary.display(), "starting mongosh");
    let source = command(binary, username, password, mongo_uri)
        .arg0(MONGOSH_BIN)
        .exec();
    Err(MongoshError::Exec {
        path: binary.to_path_buf(),
        source,
    })
}

/// Runs `mongosh` as a child with inherited stdio and exits with its status.
///
/// Without `exec` the parent stays alive until the shell exits.
#[cfg(not(unix))]
pub fn run(
    binary: &Path,
    username: &str,
    password: &str,
    mongo_uri: &str,
) -> Result<Infallible, MongoshError> {
    info!(binary = %binary.display(), "starting mongosh");
    let status = command(binary, username, password, mongo_uri)
        .status()
        .map_err(|source| MongoshError::Exec {
            path: binary.to_path_buf(),
            source,
        })?;
    tracing::debug!(?status, "mongosh exited");
    std::process::exit(status.code().unwrap_or(1));
}
