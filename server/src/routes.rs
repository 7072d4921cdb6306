//! HTTP routes. Handlers only extract, delegate to `TodoService` and shape
//! the response.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use todo_core::{AgendaParams, CreateTodo, CreatedTodo, ListParams, Todo, UpdateTodo};
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::service::TodoService;

pub fn router(service: TodoService) -> Router {
    Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{todo_id}/",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/agenda/", get(agenda))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn list_todos(
    State(service): State<TodoService>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, ServiceError> {
    service.list(&params).await.map(Json)
}

/// An unknown id answers 200 with an empty body rather than 404.
async fn get_todo(
    State(service): State<TodoService>,
    Path(todo_id): Path<i64>,
) -> Result<Response, ServiceError> {
    Ok(match service.get(todo_id).await? {
        Some(todo) => Json(todo).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

async fn agenda(
    State(service): State<TodoService>,
    Query(params): Query<AgendaParams>,
) -> Result<Json<Vec<Todo>>, ServiceError> {
    service.agenda(&params).await.map(Json)
}

async fn create_todo(
    State(service): State<TodoService>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<CreatedTodo>, ServiceError> {
    let Json(input) = body?;
    service.create(input).await.map(Json)
}

async fn update_todo(
    State(service): State<TodoService>,
    Path(todo_id): Path<i64>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<&'static str>, ServiceError> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            service.ensure_exists(todo_id).await?;
            return Err(rejection.into());
        }
    };
    service.update(todo_id, &input).await?;
    Ok(Json("Todo Updated"))
}

async fn delete_todo(
    State(service): State<TodoService>,
    Path(todo_id): Path<i64>,
) -> Result<Json<&'static str>, ServiceError> {
    service.delete(todo_id).await?;
    Ok(Json("Todo Deleted"))
}
