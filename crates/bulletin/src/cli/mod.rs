//! Command-line interface for bulletin.
//!
//! This module provides the CLI structure for the `bboard` binary and the
//! line-driven interactive session.

mod commands;
pub mod config_cmd;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClearCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, PostCommand,
    SessionCommand, StatusCommand,
};

/// bboard - A bulletin board that lives on your machine
///
/// Post short messages, list them newest first, and delete them again.
/// Everything is stored locally in a single `SQLite` file.
#[derive(Debug, Parser)]
#[command(name = "bboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for activity, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show all posts, newest first
    List(ListCommand),

    /// Add a post
    Post(PostCommand),

    /// Delete a post by id
    Delete(DeleteCommand),

    /// Read commands from stdin in one session
    Session(SessionCommand),

    /// Delete every post
    Clear(ClearCommand),

    /// Show store location and post counts
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}
