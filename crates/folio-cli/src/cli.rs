//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio CLI - Extract text, metadata and structure from PDF documents.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log pipeline progress at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Plain normalized text
    Text,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract text, pages, metadata and structure from a PDF
    Extract(ExtractArgs),

    /// Check that a PDF is within limits and can be opened
    Check(CheckArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// PDF file to ingest
    pub file: PathBuf,

    /// Maximum number of pages to extract
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Pages extracted concurrently per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Write the formatted result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// PDF file to check
    pub file: PathBuf,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Text => crate::config::OutputFormat::Text,
        }
    }
}
