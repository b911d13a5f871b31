//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Post command arguments.
#[derive(Debug, Args)]
pub struct PostCommand {
    /// Author name (at most 30 characters are kept)
    #[arg(short, long)]
    pub author: Option<String>,

    /// The message; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub content: Vec<String>,

    /// Output format for the updated board
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl PostCommand {
    /// The message as one string.
    #[must_use]
    pub fn content_text(&self) -> String {
        self.content.join(" ")
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the post to delete
    pub id: String,

    /// Output format for the updated board
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Interactive session arguments.
#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Author name to post as
    #[arg(short, long)]
    pub author: Option<String>,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for rendered boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// HTML fragment
    Html,
    /// JSON output
    Json,
}
