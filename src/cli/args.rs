//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Extract module properties from unit tests
//! - `init`: Initialize testprops configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by commands that read the project.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Prefix for resource paths built by getPath-style helpers (overrides config file)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON object keyed by module
    Json,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the configuration properties asserted by verified unit tests
    Scan(ScanCommand),
    /// Initialize a new .testpropsrc.json configuration file
    Init,
}
