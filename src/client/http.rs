//! reqwest-backed [`TodoApi`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use super::{ClientError, TodoApi};
use crate::error::ErrorBody;
use crate::types::{CreatedResponse, MessageResponse, Todo, TodoInput, TodoPayload};

/// Talks to a running server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }
}

/// Turn a non-success response into [`ClientError::Status`], keeping the
/// server's `error` message when the body has one.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = check(self.client.get(self.todos_url()).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, input: &TodoInput) -> Result<Todo, ClientError> {
        let response = self
            .client
            .post(self.todos_url())
            .json(&TodoPayload::from(input))
            .send()
            .await?;
        let created: CreatedResponse = check(response).await?.json().await?;
        debug!(id = created.newtodo.id, msg = %created.msg, "Created todo");
        Ok(created.newtodo)
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, ClientError> {
        let response = check(self.client.get(self.todo_url(id)).send().await?).await?;
        let todos: Vec<Todo> = response.json().await?;
        Ok(todos.into_iter().next())
    }

    async fn update(&self, id: i64, input: &TodoInput) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .client
            .put(self.todo_url(id))
            .json(&TodoPayload::from(input))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = check(self.client.delete(self.todo_url(id)).send().await?).await?;
        let body: MessageResponse = response.json().await?;
        debug!(id, msg = %body.msg, "Deleted todo");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), ClientError> {
        let response = check(self.client.delete(self.todos_url()).send().await?).await?;
        let body: MessageResponse = response.json().await?;
        debug!(msg = %body.msg, "Deleted all todos");
        Ok(())
    }
}
