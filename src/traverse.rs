//! # Traversal Engine
//!
//! Walks a repository and its submodule tree depth-first, letting a
//! [`Policy`] decide what happens at each node.
//!
//! ## Process
//!
//! For every repository the engine:
//!
//! 1.  Calls [`Policy::visit`] for the repository itself.
//! 2.  Lists the direct children with `git submodule status`.
//! 3.  For each child, in reported order, asks [`Policy::descend`] whether
//!     and with what context to recurse. The engine enters the child's
//!     directory, recurses, and leaves it again.
//! 4.  Calls [`Policy::finish`] once all children are done. Policies that
//!     must act on children before their parent (`push`) do their work here.
//!
//! Every reported child is offered to the policy; the engine never filters
//! on the dirty or new flags itself. The first error aborts the remaining
//! siblings and propagates to the caller. Directory changes are scoped: the
//! guard returned by [`Traversal::enter`] leaves the directory when dropped,
//! so the stack is balanced however a step ends.

use std::fmt;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runner::{quote_arg, succeeded, CommandResult, CommandRunner};
use crate::status::{self, Branch, Submodule};
use crate::workdir::{display_relative, join_lexically, DirStack};

/// Flags that keep `git diff` output in the shape the parser expects,
/// whatever `diff.submodule`, `diff.external` or `color.*` say.
const PLAIN_DIFF: &str = "git diff --no-color --no-ext-diff --submodule=short";

/// One repository of the tree, as known at the moment it is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryNode {
    /// Path from the root repository (empty for the root).
    pub path: PathBuf,
    /// Path as recorded by the parent repository (empty for the root).
    pub entry: PathBuf,
    /// Commit the parent records for this repository.
    pub pinned_commit: Option<String>,
    pub is_new: bool,
    pub is_dirty: bool,
    /// Branch named by the parent's status descriptor, if any.
    pub followed_branch: Option<String>,
}

impl RepositoryNode {
    pub fn root() -> Self {
        Self {
            path: PathBuf::new(),
            entry: PathBuf::new(),
            pinned_commit: None,
            is_new: false,
            is_dirty: false,
            followed_branch: None,
        }
    }

    /// Build the node for `submodule`, a direct child of the repository at
    /// `parent` (relative to the root). The path is resolved the way the
    /// directory stack resolves it.
    pub fn child(parent: &Path, submodule: Submodule) -> Result<Self> {
        let is_new = submodule.is_new();
        let is_dirty = submodule.is_dirty();
        Ok(Self {
            path: join_lexically(parent, &submodule.path)?,
            entry: submodule.path,
            pinned_commit: Some(submodule.commit),
            is_new,
            is_dirty,
            followed_branch: submodule.branch,
        })
    }

    pub fn is_root(&self) -> bool {
        self.pinned_commit.is_none()
    }

    /// Path for messages, `.` for the root.
    pub fn display_path(&self) -> String {
        if self.path.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

/// The per-command decision procedure applied at every node.
pub trait Policy {
    /// State handed from a parent to one of its children.
    type Context;

    /// Act on `node` before any of its children are visited.
    fn visit(
        &mut self,
        _walk: &mut Traversal<'_>,
        _node: &RepositoryNode,
        _context: &Self::Context,
    ) -> Result<()> {
        Ok(())
    }

    /// Decide whether to recurse into `child`, returning the context to
    /// recurse with, or `None` to leave it alone. Runs in the parent's
    /// directory.
    fn descend(
        &mut self,
        walk: &mut Traversal<'_>,
        child: &RepositoryNode,
    ) -> Result<Option<Self::Context>>;

    /// Act on `node` after all of its children were visited.
    fn finish(
        &mut self,
        _walk: &mut Traversal<'_>,
        _node: &RepositoryNode,
        _context: &Self::Context,
    ) -> Result<()> {
        Ok(())
    }
}

/// Context object threaded through a recursive run: the command runner, the
/// directory stack and the sink for user-facing messages.
pub struct Traversal<'a> {
    runner: &'a mut dyn CommandRunner,
    dirs: DirStack,
    out: &'a mut dyn Write,
}

impl<'a> Traversal<'a> {
    pub fn new(
        runner: &'a mut dyn CommandRunner,
        root: impl Into<PathBuf>,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            runner,
            dirs: DirStack::new(root),
            out,
        }
    }

    pub fn dirs(&self) -> &DirStack {
        &self.dirs
    }

    /// The current repository relative to the root, `.` for the root.
    pub fn location(&self) -> String {
        display_relative(self.dirs.root(), self.dirs.current())
    }

    /// Run `command` in the current repository and return its status.
    pub fn run(&mut self, command: &str) -> Result<i32> {
        self.runner.run(self.dirs.current(), command)
    }

    /// Run `command` in the current repository, capturing its output.
    pub fn capture(&mut self, command: &str) -> Result<CommandResult> {
        self.runner.run_captured(self.dirs.current(), command)
    }

    /// Run `command`, failing the traversal if it exits non-zero.
    pub fn run_checked(&mut self, command: &str) -> Result<()> {
        let status = self.run(command)?;
        self.check(command, status)
    }

    /// Capture `command`'s output, failing the traversal if it exits non-zero.
    pub fn capture_checked(&mut self, command: &str) -> Result<Vec<String>> {
        let result = self.capture(command)?;
        self.check(command, result.status)?;
        Ok(result.lines)
    }

    fn check(&self, command: &str, status: i32) -> Result<()> {
        if succeeded(status) {
            return Ok(());
        }
        Err(Error::CommandFailed {
            command: command.to_string(),
            path: PathBuf::from(self.location()),
            status,
        })
    }

    /// Write one line of user-facing output.
    pub fn report(&mut self, line: fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// The direct children of the current repository.
    pub fn submodules(&mut self) -> Result<Vec<Submodule>> {
        let lines = self.capture_checked("git submodule status")?;
        status::parse_submodule_status(&lines)
    }

    /// What the current repository is checked out to.
    pub fn current_branch(&mut self) -> Result<Branch> {
        let lines = self.capture_checked("git branch --no-color")?;
        Ok(status::current_branch(&lines))
    }

    /// The commit the current repository now records for the submodule at
    /// `entry`, when that differs from what the submodule has checked out.
    pub fn recorded_target(&mut self, entry: &Path) -> Result<Option<String>> {
        let path = entry.to_string_lossy();
        let diff = self.capture_checked(&format!("{} -- {}", PLAIN_DIFF, quote_arg(&path)))?;
        Ok(status::parse_subproject_target(&diff))
    }

    /// Resolve `revision` to a full commit id, or `None` when the repository
    /// does not have it.
    pub fn resolve_commit(&mut self, revision: &str) -> Result<Option<String>> {
        let result = self.capture(&format!(
            "git rev-parse -q --verify \"{}^{{commit}}\"",
            revision
        ))?;
        if !result.succeeded() {
            return Ok(None);
        }
        Ok(result
            .lines
            .first()
            .map(|line| line.trim().to_string())
            .filter(|commit| !commit.is_empty()))
    }

    /// The commit id the current repository's `HEAD` points at.
    pub fn head_commit(&mut self) -> Result<String> {
        let command = "git rev-parse HEAD";
        let lines = self.capture_checked(command)?;
        lines
            .first()
            .map(|line| line.trim().to_string())
            .filter(|commit| !commit.is_empty())
            .ok_or_else(|| Error::Precondition {
                path: PathBuf::from(self.location()),
                message: format!("`{}` printed no commit", command),
            })
    }

    /// Enter `path` (relative to the current repository) for the lifetime of
    /// the returned guard.
    pub fn enter(&mut self, path: &Path) -> Result<Scope<'_, 'a>> {
        self.dirs.enter(path)?;
        Ok(Scope { walk: self })
    }

    /// Apply `policy` to the root repository and its whole submodule tree.
    pub fn walk<P: Policy>(&mut self, policy: &mut P, context: P::Context) -> Result<()> {
        self.visit(policy, &RepositoryNode::root(), context)
    }

    fn visit<P: Policy>(
        &mut self,
        policy: &mut P,
        node: &RepositoryNode,
        context: P::Context,
    ) -> Result<()> {
        policy.visit(self, node, &context)?;

        for submodule in self.submodules()? {
            let child = RepositoryNode::child(&node.path, submodule)?;
            let Some(child_context) = policy.descend(self, &child)? else {
                continue;
            };
            let mut scope = self.enter(&child.entry)?;
            scope.visit(policy, &child, child_context)?;
        }

        policy.finish(self, node, &context)
    }
}

/// Guard for a directory entered with [`Traversal::enter`]; leaves it on drop.
pub struct Scope<'t, 'a> {
    walk: &'t mut Traversal<'a>,
}

impl<'a> Deref for Scope<'_, 'a> {
    type Target = Traversal<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.walk
    }
}

impl DerefMut for Scope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.walk
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.walk.dirs.leave();
    }
}
