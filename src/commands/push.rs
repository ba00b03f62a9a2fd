//! # Push Command Implementation
//!
//! Pushes every repository that follows a branch, children before their
//! parents, so a parent never publishes a submodule commit its remote does
//! not have yet. Headless repositories have nothing to push and are skipped.

use anyhow::Result;
use clap::Args;

use gitr::policies::Push;

use super::Session;

/// Push every branch-following repository, submodules before their parents
#[derive(Args, Debug)]
pub struct PushArgs {}

/// Execute the `push` command.
pub fn execute(_args: PushArgs, session: &Session) -> Result<()> {
    session.traverse(|walk| walk.walk(&mut Push, ()))
}
