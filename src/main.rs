//! Todo Tracker
//!
//! Serves the todo API and browser UI, or acts as a terminal client for a
//! running server.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use todo_tracker::cli::client::{
    prompt_stdin, run_add, run_clear, run_delete, run_edit, run_list,
};
use todo_tracker::cli::serve::{ServeArgs, run_serve};
use todo_tracker::cli::{Cli, Command};
use todo_tracker::client::{HttpTodoApi, TodoController};
use todo_tracker::config::{Config, ConfigLoader};
use todo_tracker::logging::{self, LogTarget};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut loader = ConfigLoader::load(cli.config.as_ref().map(PathBuf::from))?;
    debug!(sources = ?loader.sources(), "Using configuration");

    // Override from CLI arguments
    let config = loader.config_mut();
    if let Some(db_path) = &cli.database {
        config.server.db_path = db_path.into();
    }
    if let Some(url) = &cli.server {
        config.client.server_url = url.clone();
    }
    let mut config = loader.into_config();

    let command = cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default()));
    let mut out = std::io::stdout();
    match command {
        Command::Serve(args) => {
            args.apply(&mut config);
            run_serve(&config).await
        }
        Command::List(args) => run_list(&mut controller(&config), &args, &mut out).await,
        Command::Add(args) => run_add(&mut controller(&config), &args, &mut out).await,
        Command::Edit(args) => run_edit(&mut controller(&config), &args, &mut out).await,
        Command::Delete(args) => {
            run_delete(&mut controller(&config), &args, prompt_stdin, &mut out).await
        }
        Command::Clear(args) => {
            run_clear(&mut controller(&config), &args, prompt_stdin, &mut out).await
        }
    }
}

fn controller(config: &Config) -> TodoController<HttpTodoApi> {
    TodoController::new(HttpTodoApi::new(&config.client.server_url))
}
