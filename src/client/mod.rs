//! Client side of the todo tracker.
//!
//! [`TodoController`] holds the state a UI needs (collection, form, filter,
//! sort order, pending confirmation) and talks to the server through the
//! [`TodoApi`] trait. [`HttpTodoApi`] is the HTTP implementation.

mod controller;
mod http;
pub mod view;

pub use controller::{FormState, PendingAction, StageOutcome, TodoController};
pub use http::HttpTodoApi;
pub use view::derive;

use async_trait::async_trait;

use crate::types::{Todo, TodoInput, ValidationError};

/// Errors seen by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response, or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The form was rejected before anything was sent.
    #[error("invalid form: {0}")]
    Validation(#[from] ValidationError),

    /// The id is not in the loaded collection.
    #[error("no todo with id {0}")]
    NotFound(i64),
}

/// Operations the server exposes.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;

    async fn create(&self, input: &TodoInput) -> Result<Todo, ClientError>;

    /// Zero or one todo.
    async fn get(&self, id: i64) -> Result<Option<Todo>, ClientError>;

    /// The updated rows; empty when `id` is unknown.
    async fn update(&self, id: i64, input: &TodoInput) -> Result<Vec<Todo>, ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;

    async fn delete_all(&self) -> Result<(), ClientError>;
}
