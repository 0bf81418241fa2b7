//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Halterp CLI - Declarative interpretation of HAL documents
///
/// Turns HAL documents into plain attribute maps using a mapping file,
/// reports interpretation problems, and lists the links a document carries.
#[derive(Parser, Debug)]
#[command(
    name = "halterp",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HALTERP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interpret a document with a mapping and print the attributes
    Extract(ExtractArgs),

    /// Report every attribute a document fails to provide
    Check(CheckArgs),

    /// List the relations of a document and their hrefs
    Links(LinksArgs),
}

/// Arguments for the extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Mapping file declaring the attributes (YAML, JSON or TOML)
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// HAL document to interpret ("-" reads standard input)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Interpret every member embedded under the "item" relation
    #[arg(long)]
    pub items: bool,

    /// Base URL for resolving relative hrefs (overrides mapping and config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Mapping file declaring the attributes (YAML, JSON or TOML)
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// HAL document to check ("-" reads standard input)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Base URL for resolving relative hrefs (overrides mapping and config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for the links command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// HAL document to inspect ("-" reads standard input)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Only show this relation
    #[arg(short, long)]
    pub rel: Option<String>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse a format name as written in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
