//! # Status Command Implementation
//!
//! Prints, for the root and every submodule, whether it is on a branch or
//! headless. This command is read-only.

use anyhow::Result;
use clap::Args;

use gitr::policies::StatusReport;

use super::Session;

/// Show which branch each repository follows
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Execute the `status` command.
pub fn execute(_args: StatusArgs, session: &Session) -> Result<()> {
    let mut policy = StatusReport::new(session.output.use_color);
    session.traverse(|walk| walk.walk(&mut policy, ()))
}
