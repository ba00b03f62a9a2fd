//! Scripted stand-in for `git` used by the unit tests.
//!
//! `FakeTree` simulates a tree of repositories keyed by their path relative
//! to the root (`.` for the root itself). It answers the handful of git
//! queries the policies issue, applies checkouts and resets to its own state
//! so repeated runs can be observed, and records every command with the
//! directory it ran in.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::runner::{CommandResult, CommandRunner};
use crate::workdir::display_relative;

pub(crate) const ROOT: &str = "/work";

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRepo {
    pub branch: Option<String>,
    pub head: String,
    pub submodules: Vec<String>,
    pub diffs: HashMap<String, Vec<String>>,
    pub porcelain: Vec<String>,
    /// Commits present in the local object store.
    pub objects: HashSet<String>,
    /// Commits that become available after `git fetch --tags`.
    pub remote_objects: HashSet<String>,
}

impl FakeRepo {
    pub fn on_branch(branch: &str, head: &str) -> Self {
        Self {
            branch: Some(branch.to_string()),
            ..Self::detached(head)
        }
    }

    pub fn detached(head: &str) -> Self {
        Self {
            head: head.to_string(),
            objects: HashSet::from([head.to_string()]),
            ..Default::default()
        }
    }

    pub fn submodule(mut self, line: &str) -> Self {
        self.submodules.push(line.to_string());
        self
    }

    /// Make the submodule diff for `path` report that the parent now records `target`
    /// while the child is still at `current`.
    pub fn moved(mut self, path: &str, target: &str, current: &str) -> Self {
        self.diffs.insert(
            path.to_string(),
            vec![
                format!("diff --git a/{path} b/{path}"),
                format!("index {current}..{target} 160000"),
                format!("--- a/{path}"),
                format!("+++ b/{path}"),
                "@@ -1 +1 @@".to_string(),
                format!("-Subproject commit {target}"),
                format!("+Subproject commit {current}"),
            ],
        );
        self
    }

    pub fn with_changes(mut self, line: &str) -> Self {
        self.porcelain.push(line.to_string());
        self
    }

    pub fn with_object(mut self, commit: &str) -> Self {
        self.objects.insert(commit.to_string());
        self
    }

    pub fn with_remote_object(mut self, commit: &str) -> Self {
        self.remote_objects.insert(commit.to_string());
        self
    }

    fn branch_lines(&self) -> Vec<String> {
        match &self.branch {
            Some(branch) => vec![format!("* {branch}")],
            None => vec![format!("* (HEAD detached at {})", self.head)],
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeTree {
    pub repos: BTreeMap<String, FakeRepo>,
    pub calls: Vec<(String, String)>,
    failures: HashMap<(String, String), i32>,
}

impl FakeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo(mut self, path: &str, repo: FakeRepo) -> Self {
        self.repos.insert(path.to_string(), repo);
        self
    }

    /// Make `command` exit with `status` when run in `path`.
    pub fn fail(mut self, path: &str, command: &str, status: i32) -> Self {
        self.failures
            .insert((path.to_string(), command.to_string()), status);
        self
    }

    pub fn root() -> PathBuf {
        PathBuf::from(ROOT)
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|(dir, command)| format!("[{dir}] {command}"))
            .collect()
    }

    pub fn calls_in(&self, path: &str) -> Vec<String> {
        self.calls
            .iter()
            .filter(|(dir, _)| dir == path)
            .map(|(_, command)| command.clone())
            .collect()
    }

    /// Calls other than the read-only queries every policy makes.
    pub fn mutating_commands(&self) -> Vec<String> {
        const QUERIES: [&str; 4] = [
            "git submodule status",
            "git branch",
            "git rev-parse",
            "git status --porcelain",
        ];
        self.calls
            .iter()
            .filter(|(_, command)| !QUERIES.iter().any(|q| command.starts_with(q)))
            .map(|(dir, command)| format!("[{dir}] {command}"))
            .collect()
    }

    fn resolve(repo: &FakeRepo, revision: &str) -> Option<String> {
        let mut matches = repo.objects.iter().filter(|c| c.starts_with(revision));
        match (matches.next(), matches.next()) {
            (Some(commit), None) => Some(commit.clone()),
            _ => None,
        }
    }

    fn respond(&mut self, dir: &Path, command: &str) -> CommandResult {
        let location = display_relative(Path::new(ROOT), dir);
        self.calls.push((location.clone(), command.to_string()));

        if let Some(status) = self.failures.get(&(location.clone(), command.to_string())) {
            return CommandResult::new(*status, Vec::new());
        }

        let Some(repo) = self.repos.get_mut(&location) else {
            return CommandResult::new(128, Vec::new());
        };

        let lines = match command {
            "git submodule status" => repo.submodules.clone(),
            "git branch --no-color" => repo.branch_lines(),
            "git rev-parse HEAD" => vec![repo.head.clone()],
            "git status --porcelain" => repo.porcelain.clone(),
            "git fetch --tags" => {
                let fetched: Vec<String> = repo.remote_objects.drain().collect();
                repo.objects.extend(fetched);
                Vec::new()
            }
            _ => {
                if let Some(path) =
                    command.strip_prefix("git diff --no-color --no-ext-diff --submodule=short -- ")
                {
                    repo.diffs.get(path).cloned().unwrap_or_default()
                } else if let Some(revision) = command
                    .strip_prefix("git rev-parse -q --verify \"")
                    .and_then(|rest| rest.strip_suffix("^{commit}\""))
                {
                    return match Self::resolve(repo, revision) {
                        Some(commit) => CommandResult::new(0, vec![commit]),
                        None => CommandResult::new(1, Vec::new()),
                    };
                } else if let Some(commit) = command.strip_prefix("git checkout -q ") {
                    repo.branch = None;
                    repo.head = commit.to_string();
                    repo.objects.insert(commit.to_string());
                    Vec::new()
                } else if let Some(commit) = command.strip_prefix("git reset -q --hard ") {
                    repo.head = commit.to_string();
                    Vec::new()
                } else {
                    Vec::new()
                }
            }
        };

        CommandResult::new(0, lines)
    }
}

impl CommandRunner for FakeTree {
    fn run(&mut self, dir: &Path, command: &str) -> Result<i32> {
        Ok(self.respond(dir, command).status)
    }

    fn run_captured(&mut self, dir: &Path, command: &str) -> Result<CommandResult> {
        Ok(self.respond(dir, command))
    }
}
