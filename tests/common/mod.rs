//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = GitFixture::new();
//! fixture.init_repo("app");
//! fixture.commit("app", "README.md", "# app");
//! fixture.gitr("app").arg("status").assert().success();
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::GitFixture;
}

/// Environment applied to every `git` and `gitr` process started by tests:
/// a fixed identity, and permission to clone submodules from local paths.
const GIT_ENV: [(&str, &str); 7] = [
    ("GIT_AUTHOR_NAME", "gitr tests"),
    ("GIT_AUTHOR_EMAIL", "tests@example.com"),
    ("GIT_COMMITTER_NAME", "gitr tests"),
    ("GIT_COMMITTER_EMAIL", "tests@example.com"),
    ("GIT_CONFIG_COUNT", "1"),
    ("GIT_CONFIG_KEY_0", "protocol.file.allow"),
    ("GIT_CONFIG_VALUE_0", "always"),
];

/// A temporary directory holding any number of git repositories.
#[allow(dead_code)]
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Run git in `relative`, panicking if it fails, and return its stdout.
    pub fn git(&self, relative: &str, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.join(relative))
            .envs(GIT_ENV)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed in {}: {}",
            args,
            relative,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create an empty repository whose default branch is `main`.
    pub fn init_repo(&self, relative: &str) {
        std::fs::create_dir_all(self.join(relative)).expect("Failed to create repo dir");
        self.git(relative, &["init", "-q", "-b", "main"]);
    }

    /// Write `file` in the repository at `relative` and commit it.
    pub fn commit(&self, relative: &str, file: &str, content: &str) -> String {
        std::fs::write(self.join(relative).join(file), content).expect("Failed to write file");
        self.git(relative, &["add", file]);
        self.git(relative, &["commit", "-q", "-m", &format!("update {file}")]);
        self.head(relative)
    }

    /// Add the repository at `source` as a submodule of `parent` at `path`
    /// and commit the addition.
    pub fn add_submodule(&self, parent: &str, source: &str, path: &str) {
        let url = self.join(source);
        let url = url.to_str().expect("temp path is valid UTF-8");
        self.git(parent, &["submodule", "add", "-q", url, path]);
        self.git(parent, &["commit", "-q", "-m", &format!("add {path}")]);
    }

    pub fn head(&self, relative: &str) -> String {
        self.git(relative, &["rev-parse", "HEAD"])
    }

    /// A `gitr` command running in the repository at `relative`.
    pub fn gitr(&self, relative: &str) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gitr");
        cmd.current_dir(self.join(relative)).envs(GIT_ENV);
        cmd
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}
