//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gitr::output::OutputConfig;

use crate::commands;

/// gitr - Run git operations across a repository and all of its submodules
#[derive(Parser, Debug)]
#[command(name = "gitr")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Run as if gitr was started in DIR instead of the current directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Echo every external command and the repository it runs in
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        env = "GITR_LOG_LEVEL"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a command in the current repository and every submodule
    Do(commands::exec::DoArgs),

    /// Fetch the current repository and all submodules from their remotes
    Fetch(commands::fetch::FetchArgs),

    /// Change all submodules to not follow any branch (headless checkout of HEAD)
    Headless(commands::headless::HeadlessArgs),

    /// Pull branch-following repositories and move headless submodules to
    /// the commit their parent records
    Pull(commands::pull::PullArgs),

    /// Push every branch-following repository, submodules before their parents
    Push(commands::push::PushArgs),

    /// Show which branch each repository follows
    Status(commands::status::StatusArgs),

    /// Initialize all submodules and check them out at their recorded commits
    Update(commands::update::UpdateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Output configuration derived from `--color` and the environment.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let root = match &self.directory {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => std::env::current_dir()
                .context("Failed to read the current directory")?
                .join(dir),
            None => std::env::current_dir().context("Failed to read the current directory")?,
        };

        let session = commands::Session {
            root,
            verbose: self.verbose,
            output: self.output_config(),
        };

        match self.command {
            Commands::Do(args) => commands::exec::execute(args, &session),
            Commands::Fetch(args) => commands::fetch::execute(args, &session),
            Commands::Headless(args) => commands::headless::execute(args, &session),
            Commands::Pull(args) => commands::pull::execute(args, &session),
            Commands::Push(args) => commands::push::execute(args, &session),
            Commands::Status(args) => commands::status::execute(args, &session),
            Commands::Update(args) => commands::update::execute(args, &session),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .format_timestamp(None)
        .init();
}
