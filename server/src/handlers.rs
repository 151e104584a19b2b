//! HTTP handlers and response envelopes.
//!
//! # Design
//! Handlers stay thin: decode the body if there is one, call the service,
//! pick a status. The body is taken as `Result<Json<_>, JsonRejection>` so a
//! malformed payload becomes our own 400 envelope instead of the extractor's
//! default rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use todos_core::{Todo, TodoError, TodoInput};

use crate::service::TodoService;

static HOME_PAGE: &str = include_str!("../static/home.html");

/// Plain `{"message": ...}` envelope for errors and verb outcomes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"data": [...]}` envelope for the listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub data: Vec<Todo>,
}

/// Creation outcome: the message plus the generated identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoCreated {
    pub message: String,
    pub todo_id: String,
}

/// Maps a service error onto the wire.
///
/// Validation failures carry their own message at 400. Storage failures log
/// the cause and answer 500 with an operation-level summary, keeping driver
/// internals out of the response body.
fn error_response(err: TodoError, storage_message: &str) -> Response {
    if err.is_validation() {
        (StatusCode::BAD_REQUEST, Json(ApiMessage::new(err.to_string()))).into_response()
    } else {
        error!(error = %err, "storage operation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiMessage::new(storage_message)),
        )
            .into_response()
    }
}

/// GET / — static landing page.
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// GET /todo/ — every stored todo, wrapped in `{"data": ...}`.
pub async fn list_todos(State(service): State<TodoService>) -> Response {
    match service.list().await {
        Ok(todos) => (StatusCode::OK, Json(TodoList { data: todos })).into_response(),
        Err(err) => error_response(err, "Fetch failed"),
    }
}

/// POST /todo/ — create a todo, answer 201 with the generated id.
pub async fn create_todo(
    State(service): State<TodoService>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Response {
    let Ok(Json(input)) = body else {
        return error_response(TodoError::InvalidBody, "Insert failed");
    };

    match service.create(input).await {
        Ok(todo_id) => (
            StatusCode::CREATED,
            Json(TodoCreated {
                message: "Todo created".to_string(),
                todo_id,
            }),
        )
            .into_response(),
        Err(err) => error_response(err, "Insert failed"),
    }
}

/// PUT /todo/{id} — rewrite title and completed on the addressed todo.
pub async fn update_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Response {
    let Ok(Json(input)) = body else {
        return error_response(TodoError::InvalidBody, "Update failed");
    };

    match service.update(&id, input).await {
        Ok(()) => (StatusCode::OK, Json(ApiMessage::new("Todo updated"))).into_response(),
        Err(err) => error_response(err, "Update failed"),
    }
}

/// DELETE /todo/{id} — remove the addressed todo.
pub async fn delete_todo(State(service): State<TodoService>, Path(id): Path<String>) -> Response {
    match service.delete(&id).await {
        Ok(()) => (StatusCode::OK, Json(ApiMessage::new("Todo deleted"))).into_response(),
        Err(err) => error_response(err, "Delete failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_envelope_shape() {
        let body = TodoCreated {
            message: "Todo created".to_string(),
            todo_id: "64b0c1f2a3d4e5f60718293a".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Todo created");
        assert_eq!(json["todo_id"], "64b0c1f2a3d4e5f60718293a");
    }

    #[test]
    fn empty_list_serializes_as_an_empty_array() {
        let body = TodoList { data: Vec::new() };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"data":[]}"#);
    }

    #[test]
    fn validation_errors_answer_400_with_their_own_message() {
        let response = error_response(TodoError::InvalidId, "Update failed");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_answer_500() {
        let response = error_response(TodoError::storage("boom"), "Fetch failed");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
