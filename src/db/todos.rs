//! Todo CRUD statements.
//!
//! Every operation is a single parameterized statement; nothing here opens a
//! transaction spanning more than one statement.

use super::{Database, now_ms};
use crate::types::{Todo, TodoInput};
use anyhow::Result;
use rusqlite::{Row, params};

const TODO_COLUMNS: &str = "id, title, descp, completed, created_at, updated_at";

pub fn parse_todo_row(row: &Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("descp")?,
        completed: row.get("completed")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl Database {
    /// All todos in insertion order.
    pub fn list_todos(&self) -> Result<Vec<Todo>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))?;
            let todos = stmt
                .query_map([], parse_todo_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(todos)
        })
    }

    /// Insert a todo and return the stored row.
    pub fn create_todo(&self, input: &TodoInput) -> Result<Todo> {
        self.with_conn(|conn| {
            let todo = conn.query_row(
                &format!(
                    "INSERT INTO todos (title, descp, completed, created_at)
                     VALUES (?1, ?2, ?3, ?4)
                     RETURNING {TODO_COLUMNS}"
                ),
                params![input.title, input.description, input.completed, now_ms()],
                parse_todo_row,
            )?;
            Ok(todo)
        })
    }

    /// Fetch one todo by id.
    pub fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], parse_todo_row);

            match result {
                Ok(todo) => Ok(Some(todo)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Overwrite every editable field of the todo with `id` and stamp
    /// `updated_at`.
    ///
    /// Returns the updated rows: one element when the id exists, none
    /// otherwise.
    pub fn update_todo(&self, id: i64, input: &TodoInput) -> Result<Vec<Todo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "UPDATE todos SET title = ?1, descp = ?2, completed = ?3, updated_at = ?4
                 WHERE id = ?5
                 RETURNING {TODO_COLUMNS}"
            ))?;
            let todos = stmt
                .query_map(
                    params![input.title, input.description, input.completed, now_ms(), id],
                    parse_todo_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(todos)
        })
    }

    /// Delete the todo with `id`. Returns the number of rows removed, which is
    /// zero for an unknown id.
    pub fn delete_todo(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?))
    }

    /// Delete every todo. Returns the number of rows removed.
    pub fn delete_all_todos(&self) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM todos", [])?))
    }
}
