//! CLI command definitions for todo-tracker
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod client;
pub mod serve;

use clap::{Parser, Subcommand};
use client::{AddArgs, ClearArgs, DeleteArgs, EditArgs, ListArgs};
use serve::ServeArgs;

/// Todo tracker server and terminal client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Server URL for client commands (overrides config)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default if no subcommand given)
    Serve(ServeArgs),

    /// List todos from a running server
    List(ListArgs),

    /// Create a todo
    Add(AddArgs),

    /// Change fields of an existing todo
    Edit(EditArgs),

    /// Delete one todo
    Delete(DeleteArgs),

    /// Delete every todo
    Clear(ClearArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Filter, SortOrder};

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["todo-tracker"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log, "2");
    }

    #[test]
    fn serve_accepts_port() {
        let cli = Cli::try_parse_from(["todo-tracker", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_parses_filter_and_sort() {
        let cli = Cli::try_parse_from([
            "todo-tracker",
            "--server",
            "http://localhost:9000",
            "list",
            "--filter",
            "completed",
            "--sort",
            "desc",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Some(Command::List(args)) => {
                assert_eq!(args.filter, Filter::Completed);
                assert_eq!(args.sort, SortOrder::Desc);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_takes_explicit_completed_value() {
        let cli =
            Cli::try_parse_from(["todo-tracker", "edit", "4", "--completed", "true"]).unwrap();
        match cli.command {
            Some(Command::Edit(args)) => {
                assert_eq!(args.id, 4);
                assert_eq!(args.completed, Some(true));
                assert!(args.title.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_title() {
        assert!(Cli::try_parse_from(["todo-tracker", "add"]).is_err());
    }
}
