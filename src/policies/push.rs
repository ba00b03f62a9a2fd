//! `push`: publish local commits of every branch-following repository.
//!
//! Children are pushed before their parent. A parent's recorded submodule
//! commit is only usable by others once that commit is reachable on the
//! child's remote, so the push happens in [`Policy::finish`].

use log::info;

use crate::error::Result;
use crate::status::Branch;
use crate::traverse::{Policy, RepositoryNode, Traversal};

#[derive(Debug, Default, Clone, Copy)]
pub struct Push;

impl Policy for Push {
    type Context = ();

    fn descend(&mut self, _walk: &mut Traversal<'_>, child: &RepositoryNode) -> Result<Option<()>> {
        Ok((!child.is_new).then_some(()))
    }

    fn finish(&mut self, walk: &mut Traversal<'_>, node: &RepositoryNode, _: &()) -> Result<()> {
        match walk.current_branch()? {
            Branch::Named(branch) => {
                walk.report(format_args!("pushing {} ({})", node.display_path(), branch))?;
                walk.run_checked("git push")
            }
            Branch::Detached => {
                info!("{} is headless, nothing to push", node.display_path());
                Ok(())
            }
        }
    }
}
