//! # Working-Directory Stack
//!
//! Tracks which repository of the tree the traversal is currently operating
//! in. Instead of changing the process-wide current directory, the stack keeps
//! an explicit absolute path that is handed to every command the runner
//! executes, so nothing outside the traversal can observe or disturb it.
//!
//! `enter` and `leave` must be used in strictly nested order. The traversal
//! engine never calls them directly; it goes through a scope guard that
//! leaves the directory when dropped, on every exit path.

use std::path::{Component, Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};

/// A stack of saved directories rooted at the top-level repository.
#[derive(Debug, Clone)]
pub struct DirStack {
    root: PathBuf,
    current: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirStack {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            current: root.clone(),
            root,
            saved: Vec::new(),
        }
    }

    /// The absolute path of the root repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The absolute path of the repository currently being visited.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Number of directories entered and not yet left.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Resolve `path` against the current directory, save the current
    /// directory and make the resolved path current. See [`join_lexically`].
    pub fn enter(&mut self, path: &Path) -> Result<()> {
        if path.components().any(|c| c == Component::ParentDir) {
            warn!(
                "submodule path {} climbs out of {}",
                path.display(),
                display_relative(&self.root, &self.current)
            );
        }
        let resolved = join_lexically(&self.current, path)?;

        debug!(">>> {}", resolved.display());
        let previous = std::mem::replace(&mut self.current, resolved);
        self.saved.push(previous);
        Ok(())
    }

    /// Restore the most recently saved directory, returning the directory
    /// that was left. Returns `None` if nothing was entered.
    pub fn leave(&mut self) -> Option<PathBuf> {
        let previous = self.saved.pop()?;
        debug!("<<< {}", previous.display());
        Some(std::mem::replace(&mut self.current, previous))
    }
}

/// Join `path` onto `base` lexically: `.` components are dropped and `..`
/// removes the previous component. Absolute paths are rejected since
/// submodule paths are always reported relative to their parent.
pub fn join_lexically(base: &Path, path: &Path) -> Result<PathBuf> {
    let mut resolved = base.to_path_buf();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPath {
                    path: path.to_path_buf(),
                    message: "expected a path relative to the parent repository".to_string(),
                });
            }
        }
    }
    Ok(resolved)
}

/// Render `dir` relative to `root` for messages, using `.` for the root itself.
pub fn display_relative(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.display().to_string(),
        Err(_) => dir.display().to_string(),
    }
}
