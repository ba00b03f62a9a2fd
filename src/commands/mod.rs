//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `gitr`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments, derived
//!   using `clap`.
//! - An `execute` function that takes the parsed `Args` and the [`Session`]
//!   and calls into the `gitr` library to do the work.

pub mod completions;
pub mod exec;
pub mod fetch;
pub mod headless;
pub mod pull;
pub mod push;
pub mod status;
pub mod update;

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use gitr::output::OutputConfig;
use gitr::runner::ShellRunner;
use gitr::traverse::Traversal;

/// Settings shared by every command of one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    /// The root repository.
    pub root: PathBuf,
    /// Echo each external command before running it.
    pub verbose: bool,
    pub output: OutputConfig,
}

impl Session {
    /// Run `f` with a traversal rooted at the session's repository, backed by
    /// the real shell and writing reports to stdout.
    pub fn traverse<T>(
        &self,
        f: impl FnOnce(&mut Traversal<'_>) -> gitr::error::Result<T>,
    ) -> Result<T> {
        let mut runner = ShellRunner::new(&self.root).verbose(self.verbose);
        let mut out = io::stdout();
        let mut walk = Traversal::new(&mut runner, self.root.clone(), &mut out);
        Ok(f(&mut walk)?)
    }
}
