//! `do`: run an arbitrary command line in the root and every submodule.

use log::warn;

use crate::error::Result;
use crate::runner::join_args;
use crate::traverse::{Policy, RepositoryNode, Traversal};

/// Runs one command line verbatim at every initialized repository, parents
/// before children, regardless of branch state. The first non-zero exit
/// status stops the run.
#[derive(Debug, Clone)]
pub struct RunEverywhere {
    command: String,
}

impl RunEverywhere {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Build the command line from separate arguments, quoting those that
    /// contain whitespace.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        Self::new(join_args(args))
    }
}

impl Policy for RunEverywhere {
    type Context = ();

    fn visit(&mut self, walk: &mut Traversal<'_>, _node: &RepositoryNode, _: &()) -> Result<()> {
        walk.run_checked(&self.command)
    }

    fn descend(&mut self, _walk: &mut Traversal<'_>, child: &RepositoryNode) -> Result<Option<()>> {
        if child.is_new {
            // An empty submodule directory would run the command in the parent.
            warn!("skipping uninitialized submodule {}", child.display_path());
            return Ok(None);
        }
        Ok(Some(()))
    }
}
