//! `headless`: stop every submodule from following a branch.
//!
//! Each submodule on a branch is checked out at its own current commit by
//! hash, which detaches it without touching working-tree files. Submodules
//! already detached are left alone, so running the command twice changes
//! nothing the second time. The root keeps its branch.

use log::info;

use crate::error::Result;
use crate::status::Branch;
use crate::traverse::{Policy, RepositoryNode, Traversal};

#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Policy for Headless {
    type Context = ();

    fn visit(&mut self, walk: &mut Traversal<'_>, node: &RepositoryNode, _: &()) -> Result<()> {
        if node.is_root() {
            return Ok(());
        }

        let branch = match walk.current_branch()? {
            Branch::Named(branch) => branch,
            Branch::Detached => {
                info!("{} is already headless", node.display_path());
                return Ok(());
            }
        };

        let commit = walk.head_commit()?;
        walk.run_checked(&format!("git checkout -q {}", commit))?;
        walk.report(format_args!(
            "detached {} from {} at {}",
            node.display_path(),
            branch,
            commit
        ))
    }

    fn descend(&mut self, _walk: &mut Traversal<'_>, child: &RepositoryNode) -> Result<Option<()>> {
        Ok((!child.is_new).then_some(()))
    }
}
