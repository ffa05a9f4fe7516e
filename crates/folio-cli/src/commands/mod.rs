//! CLI commands for Folio.

pub mod cache;
pub mod profile;
pub mod projects;

pub use cache::CacheAction;

use clap::{ArgAction, Parser, Subcommand};
use folio_config::CliOverrides;
use std::path::PathBuf;

/// Folio - browse a portfolio catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog service origin, e.g. http://localhost:3001
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Session whose project cache is used
    #[arg(long, global = true, value_name = "ID")]
    pub session: Option<String>,

    /// Disable colors and Unicode icons
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration overrides carried by the flags.
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            api_url: self.api_url.clone(),
            session_id: self.session.clone(),
            ..CliOverrides::default()
        };
        if let Commands::Projects(args) = &self.command {
            overrides.initial_count = args.initial_count;
            overrides.page_limit = args.page_limit;
        }
        overrides
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects, featured first
    Projects(projects::ProjectsArgs),

    /// Show the portfolio owner's profile
    Profile,

    /// Inspect or clear the session's project cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}
