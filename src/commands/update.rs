//! # Update Command Implementation
//!
//! Shorthand for `git submodule update --init --recursive` at the root: every
//! submodule is initialized and checked out at the commit its parent records.

use anyhow::Result;
use clap::Args;

use gitr::policies;

use super::Session;

/// Initialize all submodules and check them out at their recorded commits
#[derive(Args, Debug)]
pub struct UpdateArgs {}

/// Execute the `update` command.
pub fn execute(_args: UpdateArgs, session: &Session) -> Result<()> {
    session.traverse(policies::update)
}
