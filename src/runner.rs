//! # Process Runner
//!
//! Executes external command lines through the platform shell, in a given
//! directory, either streaming their output to the terminal or capturing
//! standard output line by line.
//!
//! The [`CommandRunner`] trait is the only way the rest of the library talks
//! to the outside world. [`ShellRunner`] is the real implementation; tests
//! substitute a scripted fake that simulates a repository tree.
//!
//! Captured commands exist to be parsed, so they run in the C locale. Streamed
//! commands, including everything `do` runs, keep the user's environment.

use std::borrow::Cow;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::error::{Error, Result};
use crate::workdir::display_relative;

/// Output of a captured command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Normalized exit status, see [`exit_status_code`].
    pub status: i32,
    /// Standard output split into lines, without line terminators.
    pub lines: Vec<String>,
}

impl CommandResult {
    pub fn new(status: i32, lines: Vec<String>) -> Self {
        Self { status, lines }
    }

    pub fn succeeded(&self) -> bool {
        succeeded(self.status)
    }
}

/// Trait for running external commands - allows scripting in tests
pub trait CommandRunner {
    /// Runs `command` in `dir` with inherited standard streams and returns its
    /// normalized exit status.
    fn run(&mut self, dir: &Path, command: &str) -> Result<i32>;

    /// Runs `command` in `dir`, capturing standard output line by line.
    /// Standard error is left attached to the terminal. Output must not depend
    /// on the user's locale.
    fn run_captured(&mut self, dir: &Path, command: &str) -> Result<CommandResult>;
}

/// The default `CommandRunner`, which hands command lines to `sh -c` (or
/// `cmd /C` on Windows).
#[derive(Debug, Clone)]
pub struct ShellRunner {
    root: PathBuf,
    verbose: bool,
}

impl ShellRunner {
    /// Creates a runner whose trace output shows directories relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            verbose: false,
        }
    }

    /// When enabled, every command and its directory is echoed to stdout
    /// before it runs.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn trace(&self, dir: &Path, command: &str) {
        let location = display_relative(&self.root, dir);
        if self.verbose {
            println!("\n[{}]: {}", location, command);
        } else {
            debug!("[{}]: {}", location, command);
        }
    }

    fn spawn_error(dir: &Path, command: &str, source: std::io::Error) -> Error {
        Error::Spawn {
            command: command.to_string(),
            path: dir.to_path_buf(),
            source,
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, dir: &Path, command: &str) -> Result<i32> {
        self.trace(dir, command);
        let status = shell(command)
            .current_dir(dir)
            .status()
            .map_err(|e| Self::spawn_error(dir, command, e))?;
        Ok(exit_status_code(status))
    }

    fn run_captured(&mut self, dir: &Path, command: &str) -> Result<CommandResult> {
        self.trace(dir, command);
        let mut child = shell(command)
            .current_dir(dir)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Self::spawn_error(dir, command, e))?;

        let mut lines = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            for chunk in BufReader::new(stdout).split(b'\n') {
                let chunk = chunk?;
                let line = String::from_utf8_lossy(&chunk);
                lines.push(line.trim_end_matches('\r').to_string());
            }
        }

        let status = child.wait()?;
        Ok(CommandResult::new(exit_status_code(status), lines))
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

/// Normalize a process exit status into a single integer.
///
/// A regular exit yields its exit code. On Unix a process killed by a signal
/// has no exit code; it is reported the way shells do, as `128 + signal`.
pub fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Whether a normalized exit status means success.
pub fn succeeded(status: i32) -> bool {
    status == 0
}

/// Quote a single argument for inclusion in a shell command line.
///
/// Arguments without whitespace are passed through untouched; anything else
/// is wrapped in double quotes with embedded quotes escaped.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if !arg.is_empty() && !arg.chars().any(char::is_whitespace) {
        return Cow::Borrowed(arg);
    }
    Cow::Owned(format!("\"{}\"", arg.replace('"', "\\\"")))
}

/// Join arguments into one command line, quoting where needed.
pub fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
