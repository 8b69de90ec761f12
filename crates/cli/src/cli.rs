use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lintgate_core::{RepositoryRoot, RootLocator, RootStrategy, locate_with_fallback};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::commands::{init_command, root_command, run_command};

#[derive(Parser, Debug)]
#[command(name = "lintgate")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(
    after_help = "ENVIRONMENT:\n    RUST_LOG=debug      Enable debug logging\n    LINTGATE_CEILING    Never search for a root above this directory"
)]
pub struct Lintgate {
    #[command(subcommand)]
    pub command: Commands,
}

/// How the repository root is detected
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Walk upwards looking for .git, .hg or .svn
    #[default]
    Markers,
    /// Ask `git rev-parse --show-toplevel`
    Git,
}

impl From<Strategy> for RootStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Markers => RootStrategy::Markers,
            Strategy::Git => RootStrategy::Git,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Directory to start the root search from (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub anchor: Option<PathBuf>,

    /// How to detect the repository root
    #[arg(long, value_enum, default_value_t = Strategy::Markers)]
    pub root_strategy: Strategy,

    /// Never search for a root above this directory
    #[arg(long, value_name = "DIR", env = "LINTGATE_CEILING")]
    pub ceiling: Option<PathBuf>,
}

impl RootArgs {
    pub fn anchor(&self) -> Result<PathBuf> {
        match &self.anchor {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to get current directory"),
        }
    }

    /// Directory holding the lintgate executable, searched when no root
    /// encloses the current directory. Unused with an explicit `--anchor`.
    pub fn fallback_anchor(&self) -> Option<PathBuf> {
        if self.anchor.is_some() {
            return None;
        }
        let exe = std::env::current_exe().ok()?.canonicalize().ok()?;
        exe.parent().map(Path::to_path_buf)
    }

    pub fn locator(&self) -> Box<dyn RootLocator> {
        RootStrategy::from(self.root_strategy).locator(self.ceiling.clone())
    }

    pub fn resolve_root(&self) -> Result<RepositoryRoot> {
        let anchor = self.anchor()?;
        let fallback = self.fallback_anchor();
        let root = locate_with_fallback(self.locator().as_ref(), &anchor, fallback.as_deref())?;
        Ok(root)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the lint gate from the repository root
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        root: RootArgs,

        /// Print the command without executing it
        #[arg(long)]
        dry_run: bool,

        /// Flags forwarded verbatim to the analysis tool (use `--` to force the split)
        #[arg(
            value_name = "FLAGS",
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        flags: Vec<String>,
    },
    /// Write a default .lintgate.json at the repository root
    Init {
        #[command(flatten)]
        root: RootArgs,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Print the resolved repository root
    Root {
        #[command(flatten)]
        root: RootArgs,
    },
}

impl Commands {
    /// Execute the command, returning the exit code for the process
    pub fn execute(self) -> Result<ExitCode> {
        match self {
            Commands::Run {
                root,
                dry_run,
                flags,
            } => run_command(&root, &flags, dry_run),
            Commands::Init { root, force } => init_command(&root, force),
            Commands::Root { root } => root_command(&root),
        }
    }
}
