//! Client subcommands.
//!
//! Each command drives a [`TodoController`] the way the browser UI does:
//! load, act, reload. Destructive commands stage a pending action and ask
//! for confirmation unless `--yes` is given.

use anyhow::{Result, bail};
use clap::Args;
use std::io::Write;

use crate::client::{StageOutcome, TodoApi, TodoController};
use crate::format::{OutputFormat, format_todos_json, format_todos_table};
use crate::types::{Filter, SortOrder};

/// Arguments for the list subcommand
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Completion filter
    #[arg(short, long, value_enum, default_value_t = Filter::All)]
    pub filter: Filter,

    /// Title sort direction
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub sort: SortOrder,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the add subcommand
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Title of the new todo
    pub title: String,

    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Create the todo already completed
    #[arg(long)]
    pub completed: bool,
}

/// Arguments for the edit subcommand
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Id of the todo to change
    pub id: i64,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New completion state
    #[arg(long)]
    pub completed: Option<bool>,
}

/// Arguments for the delete subcommand
#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Id of the todo to delete
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the clear subcommand
#[derive(Args, Debug, Default)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn run_list<A: TodoApi>(
    controller: &mut TodoController<A>,
    args: &ListArgs,
    out: &mut impl Write,
) -> Result<()> {
    controller.load().await?;
    controller.set_filter(args.filter);
    controller.set_sort(args.sort);

    let visible = controller.visible();
    match args.format {
        OutputFormat::Table => write!(out, "{}", format_todos_table(&visible, controller.stats()))?,
        OutputFormat::Json => writeln!(out, "{}", format_todos_json(&visible)?)?,
    }
    Ok(())
}

pub async fn run_add<A: TodoApi>(
    controller: &mut TodoController<A>,
    args: &AddArgs,
    out: &mut impl Write,
) -> Result<()> {
    controller.begin_create();
    let form = controller.form_mut();
    form.title = args.title.clone();
    form.description = args.description.clone();
    form.completed = args.completed;

    controller.submit().await?;
    writeln!(out, "Todo added ({} total)", controller.todos().len())?;
    Ok(())
}

pub async fn run_edit<A: TodoApi>(
    controller: &mut TodoController<A>,
    args: &EditArgs,
    out: &mut impl Write,
) -> Result<()> {
    controller.load().await?;
    controller.begin_edit(args.id)?;

    let form = controller.form_mut();
    if let Some(title) = &args.title {
        form.title = title.clone();
    }
    if let Some(description) = &args.description {
        form.description = description.clone();
    }
    if let Some(completed) = args.completed {
        form.completed = completed;
    }

    controller.submit().await?;
    writeln!(out, "Todo {} updated", args.id)?;
    Ok(())
}

pub async fn run_delete<A: TodoApi>(
    controller: &mut TodoController<A>,
    args: &DeleteArgs,
    confirm: impl FnOnce(&str) -> bool,
    out: &mut impl Write,
) -> Result<()> {
    controller.load().await?;
    controller.request_delete(args.id)?;
    resolve(controller, args.yes, confirm, out).await
}

pub async fn run_clear<A: TodoApi>(
    controller: &mut TodoController<A>,
    args: &ClearArgs,
    confirm: impl FnOnce(&str) -> bool,
    out: &mut impl Write,
) -> Result<()> {
    controller.load().await?;
    if controller.request_delete_all() == StageOutcome::NothingToDelete {
        writeln!(out, "No tasks to delete")?;
        return Ok(());
    }
    resolve(controller, args.yes, confirm, out).await
}

/// Confirm or cancel the staged action.
async fn resolve<A: TodoApi>(
    controller: &mut TodoController<A>,
    skip_prompt: bool,
    confirm: impl FnOnce(&str) -> bool,
    out: &mut impl Write,
) -> Result<()> {
    let Some(prompt) = controller.prompt().map(str::to_string) else {
        bail!("no action is pending");
    };

    if skip_prompt || confirm(&prompt) {
        controller.confirm().await?;
        writeln!(out, "Deleted ({} remaining)", controller.todos().len())?;
    } else {
        controller.cancel();
        writeln!(out, "Cancelled")?;
    }
    Ok(())
}

/// Ask on stdin; anything but `y`/`yes` declines.
pub fn prompt_stdin(message: &str) -> bool {
    eprint!("{} [y/N] ", message);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
