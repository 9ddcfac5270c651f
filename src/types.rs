//! Core types shared by the server, the persistence layer and the client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A todo item as stored in the `todos` table and sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    /// Free-text description. Named `descp` on the wire and in the table.
    #[serde(rename = "descp")]
    pub description: String,
    pub completed: bool,
    /// Insert time in milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Last update time in milliseconds; `None` until the first update.
    pub updated_at: Option<i64>,
}

/// Validated fields for a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed,
        }
    }
}

/// Request body for `POST /todos` and `PUT /todos/{id}`.
///
/// Every field is optional at the serde level so that a missing title can be
/// reported by name instead of as a generic decode failure. Wrong JSON types
/// are still rejected during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Reasons a [`TodoPayload`] fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) | ValidationError::Empty(field) => field,
        }
    }
}

impl TodoPayload {
    /// Check required fields and fill defaults.
    ///
    /// The title must contain something other than whitespace and is kept
    /// as submitted. A missing description
    /// becomes the empty string and a missing `completed` becomes `false`.
    pub fn validate(self) -> Result<TodoInput, ValidationError> {
        let title = self.title.ok_or(ValidationError::Missing("title"))?;
        if title.trim().is_empty() {
            return Err(ValidationError::Empty("title"));
        }
        Ok(TodoInput {
            title,
            description: self.descp.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
        })
    }
}

impl From<&TodoInput> for TodoPayload {
    fn from(input: &TodoInput) -> Self {
        Self {
            title: Some(input.title.clone()),
            descp: Some(input.description.clone()),
            completed: Some(input.completed),
        }
    }
}

/// Response body for `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub newtodo: Todo,
    pub msg: String,
    pub success: bool,
}

/// Response body for the delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// Completion-state filter applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl Filter {
    /// Whether a todo passes this filter.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => todo.completed,
            Filter::Incomplete => !todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "incomplete" => Ok(Filter::Incomplete),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

/// Title sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Counts over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
}

impl TodoStats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total: todos.len(),
            completed,
            incomplete: todos.len() - completed,
        }
    }
}
