//! # Headless Command Implementation
//!
//! Detaches every submodule from the branch it follows by checking out its
//! current commit by hash. Working-tree files are untouched and the root
//! repository keeps its branch.

use anyhow::Result;
use clap::Args;

use gitr::policies::Headless;

use super::Session;

/// Change all submodules to not follow any branch
#[derive(Args, Debug)]
pub struct HeadlessArgs {}

/// Execute the `headless` command.
pub fn execute(_args: HeadlessArgs, session: &Session) -> Result<()> {
    session.traverse(|walk| walk.walk(&mut Headless, ()))
}
