//! Terminal output for the client commands.

use crate::types::{Todo, TodoStats};

/// Output format for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Render the visible todos as a plain-text table followed by the stats line.
pub fn format_todos_table(todos: &[&Todo], stats: TodoStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("Tasks ({})\n", todos.len()));

    if todos.is_empty() {
        out.push_str("No tasks found\n");
    } else {
        let id_width = todos
            .iter()
            .map(|t| t.id.to_string().len())
            .max()
            .unwrap_or(1);
        for todo in todos {
            let mark = if todo.completed { "x" } else { " " };
            out.push_str(&format!(
                "{:>width$}  [{}] {}",
                todo.id,
                mark,
                todo.title,
                width = id_width
            ));
            if !todo.description.is_empty() {
                out.push_str(&format!(" - {}", todo.description));
            }
            out.push('\n');
        }
    }

    out.push_str(&format_stats(stats));
    out
}

pub fn format_stats(stats: TodoStats) -> String {
    format!(
        "total: {}, completed: {}, in progress: {}\n",
        stats.total, stats.completed, stats.incomplete
    )
}

/// Render the visible todos as a JSON array.
pub fn format_todos_json(todos: &[&Todo]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(todos)
}
