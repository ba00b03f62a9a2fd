//! # Repository Status Parser
//!
//! Turns the textual reports of `git` into structured values:
//!
//! - `git submodule status` lines become [`Submodule`] records. Two grammars
//!   are accepted, both anchored at the start and end of the line:
//!   - the *described* form `<flag><commit> <path> (<descriptor>)`;
//!   - the *bare* form `<flag><commit> <path>`, which git emits when it cannot
//!     describe the checked-out commit.
//!
//!   The described grammar is always tried first. A line matching neither is
//!   a hard error: guessing at a child's state could make later steps reset
//!   or skip the wrong repository.
//! - `git branch` output becomes a [`Branch`].
//! - `git diff --submodule=short -- <submodule>` output yields the commit the
//!   parent now records for that submodule, if it changed.
//!
//! The callers run these queries in the C locale with colors and external
//! diff drivers disabled, which is the only output shape parsed here.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static DESCRIBED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+\- ])(\w+) (.+) \((.*)\)$").expect("described status grammar is valid")
});

static BARE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+\- ])(\w+) (.+)$").expect("bare status grammar is valid"));

static DETACHED_BRANCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\* \((?:no branch.*|detached (?:from|at) .+|HEAD detached (?:from|at) .+)\)$")
        .expect("detached branch grammar is valid")
});

static SUBPROJECT_REMOVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-Subproject commit (\w+)").expect("subproject diff grammar is valid")
});

/// Checkout state of a submodule as seen from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    /// Checked out at the commit the parent records (` ` flag).
    Clean,
    /// Checked out at a different commit than the parent records (`+` flag).
    Dirty,
    /// Recorded by the parent but not initialized yet (`-` flag).
    New,
}

impl SubmoduleState {
    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            " " => Some(Self::Clean),
            "+" => Some(Self::Dirty),
            "-" => Some(Self::New),
            _ => None,
        }
    }
}

/// One direct child reported by `git submodule status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    /// Commit the parent records for this child.
    pub commit: String,
    /// Path of the child relative to the parent repository.
    pub path: PathBuf,
    pub state: SubmoduleState,
    /// Branch name when the `git describe` suffix has the form `heads/<name>`.
    pub branch: Option<String>,
}

impl Submodule {
    pub fn is_dirty(&self) -> bool {
        self.state == SubmoduleState::Dirty
    }

    pub fn is_new(&self) -> bool {
        self.state == SubmoduleState::New
    }
}

/// Parse a single `git submodule status` line.
pub fn parse_submodule_line(line: &str) -> Result<Submodule> {
    let line = line.trim_end_matches(['\n', '\r']);
    let malformed = || Error::MalformedStatusLine {
        line: line.to_string(),
    };

    let captures = match DESCRIBED_LINE.captures(line) {
        Some(captures) => captures,
        None => BARE_LINE.captures(line).ok_or_else(malformed)?,
    };

    let state = SubmoduleState::from_flag(&captures[1]).ok_or_else(malformed)?;
    let branch = captures
        .get(4)
        .and_then(|d| d.as_str().strip_prefix("heads/"))
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Ok(Submodule {
        commit: captures[2].to_string(),
        path: PathBuf::from(&captures[3]),
        state,
        branch,
    })
}

/// Parse the full output of `git submodule status`, skipping blank lines.
pub fn parse_submodule_status<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Submodule>> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(parse_submodule_line)
        .collect()
}

/// What a repository's working copy is checked out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    /// Following the named local branch.
    Named(String),
    /// Checked out at a bare commit.
    Detached,
}

/// Parse the current-branch line of `git branch` (the one marked with `* `).
///
/// Detached annotations such as `* (no branch)` or `* (detached from a1b2c3d)`
/// yield [`Branch::Detached`], as does a line without the `* ` marker.
pub fn parse_current_branch(line: &str) -> Branch {
    let line = line.trim_end();
    if DETACHED_BRANCH.is_match(line) {
        return Branch::Detached;
    }
    match line.strip_prefix("* ").map(str::trim) {
        Some(name) if !name.is_empty() => Branch::Named(name.to_string()),
        _ => Branch::Detached,
    }
}

/// Find and parse the current branch in the full output of `git branch`.
///
/// A repository with no commits yet prints nothing; that counts as detached.
pub fn current_branch<S: AsRef<str>>(lines: &[S]) -> Branch {
    lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| line.starts_with("* "))
        .map(parse_current_branch)
        .unwrap_or(Branch::Detached)
}

/// Extract the commit a parent now records for a submodule from the output
/// of `git diff --submodule=short -- <path>`.
///
/// The removed `-Subproject commit <id>` line holds the recorded commit; the
/// added line holds what the child is actually checked out at. Without a
/// removed line nothing changed and `None` is returned.
pub fn parse_subproject_target<S: AsRef<str>>(diff: &[S]) -> Option<String> {
    diff.iter()
        .filter_map(|line| SUBPROJECT_REMOVED.captures(line.as_ref()))
        .last()
        .map(|captures| captures[1].to_string())
}

/// Whether `git status --porcelain` output describes a clean working tree.
pub fn is_clean_porcelain<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().all(|line| line.as_ref().trim().is_empty())
}
