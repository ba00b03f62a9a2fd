//! # Error Handling
//!
//! This module defines the error type shared by every part of the `gitr`
//! library. It uses `thiserror` to build a single `Error` enum covering the
//! failure modes of a recursive run:
//!
//! - **`CommandFailed`**: an external command (usually `git`) exited with a
//!   non-zero status. The run stops immediately and the binary exits with
//!   that same status.
//! - **`MalformedStatusLine`**: a line of `git submodule status` output did
//!   not match any accepted shape. Continuing without knowing a child's real
//!   state is unsafe, so this is fatal.
//! - **`Precondition`**: a policy refused to act on the repository it was
//!   given, e.g. `pull` on a headless root with no target commit.
//! - **`Spawn`**, **`InvalidPath`** and **`Io`**: problems starting a process
//!   or moving between directories.
//!
//! Every variant is terminal for the run. Nothing in the library retries or
//! recovers locally; errors are propagated with `?` up to the binary, which
//! prints them and exits with [`Error::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gitr operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external command returned a non-zero exit status.
    #[error("`{command}` returned {status} in {}", path.display())]
    CommandFailed {
        command: String,
        path: PathBuf,
        status: i32,
    },

    /// A `git submodule status` line did not match either accepted grammar.
    #[error("Unable to parse submodule status: {line:?}")]
    MalformedStatusLine { line: String },

    /// A policy refused to run against the repository in its current state.
    #[error("{}: {message}", path.display())]
    Precondition { path: PathBuf, message: String },

    /// The shell used to run a command could not be started.
    #[error("Failed to run `{command}` in {}: {source}", path.display())]
    Spawn {
        command: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The working-directory stack was asked to enter a path it cannot resolve.
    #[error("Invalid submodule path {}: {message}", path.display())]
    InvalidPath { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The process exit code this error should terminate the program with.
    ///
    /// External command failures pass their status through so that callers
    /// scripting `gitr` see the same code the failing `git` produced. Statuses
    /// outside `1..=255` are folded to 1 so a failure never looks like success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::CommandFailed { status, .. } => match u8::try_from(*status) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
            _ => 1,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
