//! HTTP handlers for the `/todos` API.
//!
//! Each handler maps to exactly one statement in [`crate::db::todos`]. The
//! SQLite calls block, so they run on the blocking thread pool.

use axum::{
    Json, Router,
    extract::{FromRequest, Path, Request, State, rejection::JsonRejection},
    response::Html,
    routing::get,
};
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::templates;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::types::{CreatedResponse, MessageResponse, Todo, TodoPayload};

pub const MSG_CREATED: &str = "Todo added successfully";
pub const MSG_DELETED: &str = "task deleted successfully";
pub const MSG_DELETED_ALL: &str = "All tasks deleted successfully";

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Run a database call on the blocking pool.
    async fn run<F, T>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        Ok(result?)
    }
}

/// JSON body extractor that reports decode failures as [`ApiError::BadRequest`].
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

/// Parse a path id. Anything other than an integer is a bad request.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::invalid_field("id", format!("invalid todo id: {}", raw)))
}

/// Health check response.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Root endpoint - serves the browser UI.
async fn root() -> Html<&'static str> {
    Html(templates::INDEX_TEMPLATE)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /todos`
async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.run(|db| db.list_todos()).await?;
    Ok(Json(todos))
}

/// `POST /todos`
async fn create_todo(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TodoPayload>,
) -> ApiResult<Json<CreatedResponse>> {
    let input = payload.validate()?;
    let todo = state.run(move |db| db.create_todo(&input)).await?;
    info!(id = todo.id, title = %todo.title, "Todo created");
    Ok(Json(CreatedResponse {
        newtodo: todo,
        msg: MSG_CREATED.to_string(),
        success: true,
    }))
}

/// `GET /todos/{id}` - zero or one element.
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Todo>>> {
    let id = parse_id(&id)?;
    let todo = state.run(move |db| db.get_todo(id)).await?;
    Ok(Json(todo.into_iter().collect()))
}

/// `PUT /todos/{id}` - the updated rows, empty when the id is unknown.
async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<TodoPayload>,
) -> ApiResult<Json<Vec<Todo>>> {
    let id = parse_id(&id)?;
    let input = payload.validate()?;
    let todos = state.run(move |db| db.update_todo(id, &input)).await?;
    info!(id, updated = todos.len(), "Todo updated");
    Ok(Json(todos))
}

/// `DELETE /todos/{id}` - a no-op for unknown ids.
async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let removed = state.run(move |db| db.delete_todo(id)).await?;
    info!(id, removed, "Todo deleted");
    Ok(Json(MessageResponse {
        msg: MSG_DELETED.to_string(),
    }))
}

/// `DELETE /todos`
async fn delete_all_todos(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let removed = state.run(|db| db.delete_all_todos()).await?;
    info!(removed, "All todos deleted");
    Ok(Json(MessageResponse {
        msg: MSG_DELETED_ALL.to_string(),
    }))
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    // The browser UI may be served from another origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
