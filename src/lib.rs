//! # gitr
//!
//! This library drives git across a repository and every submodule nested
//! beneath it. It is used by the `gitr` command-line tool, which exposes one
//! subcommand per operation (`do`, `fetch`, `headless`, `pull`, `push`,
//! `status`, `update`).
//!
//! ## Quick Example
//!
//! ```no_run
//! use gitr::policies::StatusReport;
//! use gitr::runner::ShellRunner;
//! use gitr::traverse::Traversal;
//!
//! let root = std::env::current_dir().unwrap();
//! let mut runner = ShellRunner::new(&root);
//! let mut out = std::io::stdout();
//!
//! let mut walk = Traversal::new(&mut runner, root, &mut out);
//! walk.walk(&mut StatusReport::new(false), ()).unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **Process Runner (`runner`)**: runs command lines through the shell in a
//!   given directory, optionally capturing stdout line by line.
//! - **Working-Directory Stack (`workdir`)**: tracks the repository being
//!   visited without changing the process-wide current directory.
//! - **Status Parser (`status`)**: turns `git submodule status`, `git branch`
//!   and submodule `git diff` output into typed values.
//! - **Traversal Engine (`traverse`)**: walks the tree depth-first and asks a
//!   `Policy` what to do at each repository.
//! - **Policies (`policies`)**: one decision procedure per command.
//!
//! git itself is never reimplemented: every change to a repository is made by
//! running `git`, and the first failing command ends the run.

pub mod error;
pub mod output;
pub mod policies;
pub mod runner;
pub mod status;
pub mod traverse;
pub mod workdir;

#[cfg(test)]
mod testing;
