//! CLI parse: clap types for storyhash. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storyhash CLI - build and navigate story hierarchies from registration batches
#[derive(Parser)]
#[command(name = "storyhash")]
#[command(about = "Build and navigate story hierarchies from registration batches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register batches in order and print the resulting hierarchy
    Index {
        /// Batch files (JSON object of id -> story record)
        #[arg(required = true)]
        batches: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Register batches and report integrity issues and merge anomalies
    Check {
        #[arg(required = true)]
        batches: Vec<PathBuf>,
    },
    /// Print where a next/previous jump from a story would land
    Jump {
        batch: PathBuf,
        /// Story to jump from
        #[arg(long)]
        from: String,
        /// Jump between components instead of stories
        #[arg(long)]
        component: bool,
        /// Jump backwards
        #[arg(long)]
        prev: bool,
        /// View mode (story, docs, info); defaults to configuration
        #[arg(long)]
        view_mode: Option<String>,
    },
    /// Resolve a selection by id, by kind and name, or by name within the current kind
    Select {
        batch: PathBuf,
        /// Current story
        #[arg(long)]
        from: Option<String>,
        /// Kind or full story id
        #[arg(long)]
        kind: Option<String>,
        /// Story name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        view_mode: Option<String>,
    },
    /// Print a story's parameters, or one parameter
    Params {
        batch: PathBuf,
        id: String,
        name: Option<String>,
    },
}
