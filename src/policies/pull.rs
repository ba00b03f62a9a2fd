//! `pull`: bring every repository up to date.
//!
//! Repositories following a branch pull it from their remote. Headless
//! repositories are moved to the commit their parent now records for them.
//! The parent discovers that commit after its own pull by diffing its
//! submodule pointer (`git diff --submodule=short -- <path>`): the removed
//! `-Subproject commit <id>` line is the new target, and it is handed down
//! as the child's context. A root with no branch can only be pulled when a
//! target commit is given explicitly.

use std::path::PathBuf;

use log::info;

use crate::error::{Error, Result};
use crate::runner::quote_arg;
use crate::status::{self, Branch};
use crate::traverse::{Policy, RepositoryNode, Traversal};

/// The `pull` policy. Its context is the commit the parent expects the
/// repository to be at, when that changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pull;

impl Pull {
    fn require_clean(walk: &mut Traversal<'_>) -> Result<()> {
        let changes = walk.capture_checked("git status --porcelain")?;
        if status::is_clean_porcelain(&changes) {
            return Ok(());
        }
        Err(Error::Precondition {
            path: PathBuf::from(walk.location()),
            message: "working tree has uncommitted changes, please commit before pulling"
                .to_string(),
        })
    }

    fn checkout_target(
        walk: &mut Traversal<'_>,
        node: &RepositoryNode,
        target: &str,
    ) -> Result<()> {
        let commit = match walk.resolve_commit(target)? {
            Some(commit) => commit,
            None => {
                walk.run_checked("git fetch --tags")?;
                walk.resolve_commit(target)?.ok_or_else(|| Error::Precondition {
                    path: PathBuf::from(walk.location()),
                    message: format!("commit {} not found, even after fetching", target),
                })?
            }
        };

        let head = walk.head_commit()?;
        if head == commit {
            info!("{} is already at {}", node.display_path(), target);
            return Ok(());
        }

        walk.report(format_args!(
            "checking out {} to {}",
            node.display_path(),
            target
        ))?;
        walk.run_checked(&format!("git reset -q --hard {}", commit))
    }
}

impl Policy for Pull {
    type Context = Option<String>;

    fn visit(
        &mut self,
        walk: &mut Traversal<'_>,
        node: &RepositoryNode,
        target: &Option<String>,
    ) -> Result<()> {
        Self::require_clean(walk)?;

        match (walk.current_branch()?, target) {
            (Branch::Named(branch), _) => {
                if let Some(target) = target {
                    info!(
                        "{} follows {}, ignoring recorded commit {}",
                        node.display_path(),
                        branch,
                        target
                    );
                }
                walk.report(format_args!("pulling {}", node.display_path()))?;
                walk.run_checked("git pull")
            }
            (Branch::Detached, Some(target)) => Self::checkout_target(walk, node, target),
            (Branch::Detached, None) if node.is_root() => Err(Error::Precondition {
                path: PathBuf::from(walk.location()),
                message: "root is not on a branch; check out a branch or pass the commit to pull to"
                    .to_string(),
            }),
            (Branch::Detached, None) => {
                info!(
                    "{} is headless and its recorded commit is unchanged",
                    node.display_path()
                );
                Ok(())
            }
        }
    }

    fn descend(
        &mut self,
        walk: &mut Traversal<'_>,
        child: &RepositoryNode,
    ) -> Result<Option<Option<String>>> {
        if child.is_new {
            let path = child.entry.to_string_lossy();
            walk.run_checked(&format!(
                "git submodule update --init -- {}",
                quote_arg(&path)
            ))?;
            return Ok(Some(None));
        }

        Ok(Some(walk.recorded_target(&child.entry)?))
    }
}
